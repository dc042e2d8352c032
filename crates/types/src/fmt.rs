//! Hex formatting and parsing of fixed-size byte newtypes.
//!
//! `Display` and `UpperHex` write upper case hex, `LowerHex` lower case.
//! Parsing accepts either case and requires exactly the type's width.
//!
//! [`Address`] only gets the hex traits; its `Display` and `FromStr` use the
//! checksummed text form in [`crate::address`].

use crate::{Address, Digest};
use core::{fmt, str};

macro_rules! impl_hex {
    (@hex $ty:ident) => {
        impl fmt::LowerHex for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::UpperHex for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&hex::encode_upper(self.0))
            }
        }
    };
    ($ty:ident) => {
        impl_hex!(@hex $ty);

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::UpperHex::fmt(self, f)
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!(stringify!($ty), "({:X})"), self)
            }
        }

        impl str::FromStr for $ty {
            type Err = hex::FromHexError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = Self::default().0;
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }
        }
    };
}

impl_hex!(Digest);
impl_hex!(@hex Address);
