//! Campaign Kinds
//!
//! Closed vocabularies stored as free text in the campaign table. Each keeps an
//! `Unrecognized` variant holding the original text so nothing is lost when a new
//! value appears upstream.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+

            /// A value not in the known vocabulary, kept verbatim.
            Unrecognized(String),
        }

        impl $name {
            /// The stored text for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Unrecognized(text) => text,
                }
            }

            /// Whether the value is outside the known vocabulary.
            pub fn is_unrecognized(&self) -> bool {
                matches!(self, Self::Unrecognized(_))
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                match text {
                    $($text => Self::$variant,)+
                    other => Self::Unrecognized(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                match text.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Unrecognized(text),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unrecognized(text) => text,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum! {
    /// Campaign type, stored in the `issue_type` column.
    CampaignType {
        /// Deal of the day.
        DealOfTheDay => "DOD",
        /// Spin-the-wheel giveaway.
        SpinWheel => "SPIN_WHEEL",
        /// Time-boxed flash sale.
        FlashSale => "FLASH_SALE",
        /// Explicit catch-all used by the campaign team.
        Other => "OTHER",
    }
}

text_enum! {
    /// Kind of change a campaign request asks for.
    RequestType {
        /// Selling price change.
        SellingPriceChange => "SP Change",
        /// Product replacement.
        Replacement => "Replacement",
    }
}

text_enum! {
    /// Whether a campaign is funded organically.
    MonetaryType {
        /// Organic placement.
        Organic => "Organic",
        /// Paid placement.
        Inorganic => "Inorganic",
    }
}

impl Default for CampaignType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl Default for RequestType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}
