//! JSON and XML document generators.

use super::string::random_alphanumeric;
use fuzz_core::GeneratedValue;
use rand::distributions::Uniform;
use rand::Rng;
use serde_json::{Map, Value};

const JSON_TOKEN_LENGTH: usize = 6;
const XML_RECORDS: usize = 2;

/// Random lowercase letters.
fn random_letters<R: Rng>(rng: &mut R, len: usize) -> String {
    let letters = Uniform::new_inclusive(b'a', b'z');
    (0..len).map(|_| char::from(rng.sample(&letters))).collect()
}

/// Two-key object with random 6-letter keys and values.
pub fn generate_json<R: Rng>(rng: &mut R) -> GeneratedValue {
    let mut object = Map::new();
    while object.len() < 2 {
        let key = random_letters(rng, JSON_TOKEN_LENGTH);
        let value = random_letters(rng, JSON_TOKEN_LENGTH);
        object.insert(key, Value::String(value));
    }
    GeneratedValue::Json(Value::Object(object))
}

/// Small well-formed document: `<xml>` wrapping two `<record>` elements.
pub fn generate_xml<R: Rng>(rng: &mut R) -> GeneratedValue {
    let mut xml = String::from("<xml>");
    for _ in 0..XML_RECORDS {
        let first = random_letters(rng, 8);
        let last = random_letters(rng, 8);
        let password = random_alphanumeric(rng, 12);
        xml.push_str(&format!(
            "<record><first_name>{first}</first_name><last_name>{last}</last_name>\
             <password>{password}</password></record>"
        ));
    }
    xml.push_str("</xml>");
    GeneratedValue::Text(xml)
}
