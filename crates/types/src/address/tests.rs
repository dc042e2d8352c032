use super::*;

const ZERO: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";
const COUNTING: &str = "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";

fn counting() -> Address {
    let mut key = [0; ADDRESS_LENGTH];
    for (i, b) in key.iter_mut().enumerate() {
        *b = i as u8;
    }
    Address(key)
}

#[test]
fn known_addresses() {
    assert_eq!(Address([0; 32]).to_string(), ZERO);
    assert_eq!(counting().to_string(), COUNTING);
    assert_eq!(ZERO.parse::<Address>().unwrap(), Address([0; 32]));
    assert_eq!(COUNTING.parse::<Address>().unwrap(), counting());
}

#[test]
fn debug_shows_text_form() {
    assert_eq!(format!("{:?}", Address([0; 32])), format!("Address({ZERO})"));
}

#[test]
fn rejects_wrong_length() {
    assert_eq!(
        ZERO[1..].parse::<Address>().unwrap_err(),
        AddressError::Length(57)
    );
    assert_eq!(
        "AB".parse::<Address>().unwrap_err(),
        AddressError::Length(2)
    );
}

#[test]
fn rejects_lower_case_and_padding_characters() {
    let lower = ZERO.to_lowercase();
    assert_eq!(
        lower.parse::<Address>().unwrap_err(),
        AddressError::Character(0)
    );
    let mut padded = ZERO.to_string();
    padded.replace_range(3..4, "=");
    assert_eq!(
        padded.parse::<Address>().unwrap_err(),
        AddressError::Character(3)
    );
}

#[test]
fn rejects_bad_checksum() {
    // Flip one key character; the checksum no longer matches.
    let mut text = ZERO.to_string();
    text.replace_range(0..1, "B");
    assert_eq!(
        text.parse::<Address>().unwrap_err(),
        AddressError::Checksum
    );
}

#[test]
fn rejects_trailing_bits() {
    // The last character carries 2 data bits; `R` sets an unused one.
    let mut text = ZERO.to_string();
    text.replace_range(57..58, "R");
    assert_eq!(
        text.parse::<Address>().unwrap_err(),
        AddressError::TrailingBits
    );
}
