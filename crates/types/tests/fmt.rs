use packlog_types::{Address, Digest, Price, ADDRESS_TEXT_LENGTH};
use prop::test_runner::FileFailurePersistence;
use proptest::{prelude::*, test_runner::Config};

proptest! {
    #![proptest_config(Config::with_failure_persistence(FileFailurePersistence::WithSource("regressions")))]

    #[test]
    fn digest_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let digest = Digest(bytes);

        // `fmt::LowerHex`
        let lower_hex = format!("{digest:x}");
        // `fmt::UpperHex`
        let upper_hex = format!("{digest:X}");
        // `fmt::Display`
        let display = format!("{digest}");

        let parsed: Digest = display.parse().unwrap();

        prop_assert_eq!(parsed, digest);
        prop_assert_eq!(lower_hex.len(), 64);
        prop_assert_eq!(upper_hex.len(), 64);
        prop_assert_eq!(upper_hex.to_lowercase(), lower_hex);
    }

    #[test]
    fn address_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let address = Address(bytes);
        let display = format!("{address}");
        let parsed: Address = display.parse().unwrap();
        prop_assert_eq!(parsed, address);
        prop_assert_eq!(display.len(), ADDRESS_TEXT_LENGTH);
        prop_assert_eq!(format!("{address:x}"), format!("{address:X}").to_lowercase());
    }

    #[test]
    fn price_roundtrip(value in any::<u128>()) {
        let price = Price::from(value);
        let parsed: Price = price.to_string().parse().unwrap();
        prop_assert_eq!(parsed, price);
        prop_assert_eq!(price.to_u128(), Some(value));
    }

    #[test]
    fn wide_price_roundtrip(high in 1u8.., rest in prop::array::uniform16(0u8..)) {
        let mut bytes = [high; 17];
        bytes[1..].copy_from_slice(&rest);
        let price = Price(bytes);
        let display = price.to_string();
        prop_assert!(display.starts_with("0x"));
        prop_assert_eq!(display.parse::<Price>().unwrap(), price);
    }
}

#[test]
fn rejects_wrong_length() {
    assert!("ABCD".parse::<Digest>().is_err());
    assert!("zz".repeat(32).parse::<Address>().is_err());
}
