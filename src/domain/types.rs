//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, slugs, prices and presentation enums are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or invalid.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value fell outside of its allowed range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Slug contained characters outside of `[a-z0-9-]`.
    #[error("{0} may only contain lowercase letters, digits and dashes")]
    InvalidSlug(&'static str),
    /// URL or site path validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Generates a closed string enum with `as_str`, `Display` and `TryFrom<&str>`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, default = $default:ident, {
            $($variant:ident => $text:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// String representation used in persistence and forms.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "{}: {other}",
                        $field
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

id_newtype!(BrandId, "Unique identifier for a brand.", "brand_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a catalog category.",
    "category_id"
);
id_newtype!(
    MotorcycleId,
    "Unique identifier for a motorcycle.",
    "motorcycle_id"
);
id_newtype!(
    MotorcycleImageId,
    "Unique identifier for a gallery image.",
    "image_id"
);
id_newtype!(SpecItemId, "Unique identifier for a spec sheet row.", "spec_item_id");
id_newtype!(SliderId, "Unique identifier for a slider.", "slider_id");
id_newtype!(SlideId, "Unique identifier for a slide.", "slide_id");
id_newtype!(FaqId, "Unique identifier for a FAQ entry.", "faq_id");
id_newtype!(LeadId, "Unique identifier for a lead submission.", "lead_id");

non_empty_string_newtype!(BrandName, "Brand display name.", "brand name");
non_empty_string_newtype!(CategoryName, "Category display name.", "category name");
non_empty_string_newtype!(MotorcycleName, "Motorcycle model name.", "motorcycle name");
non_empty_string_newtype!(SliderName, "Slider display name.", "slider name");
non_empty_string_newtype!(SpecGroup, "Spec sheet group heading.", "spec group");
non_empty_string_newtype!(SpecKey, "Spec sheet row label.", "spec key");
non_empty_string_newtype!(PersonName, "Full name of a lead.", "full name");

non_negative_i32_newtype!(SortOrder, "Position within an ordered list.", "sort order");

/// URL-safe identifier: lowercase ASCII letters, digits and single dashes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validates an already normalised slug.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = trim_and_require_non_empty(value, "slug")?;
        let valid_chars = value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !valid_chars || value.starts_with('-') || value.ends_with('-') || value.contains("--")
        {
            return Err(TypeConstraintError::InvalidSlug("slug"));
        }
        Ok(Self(value))
    }

    /// Derives a slug from a display name.
    pub fn from_name(name: &str) -> Result<Self, TypeConstraintError> {
        Self::new(slugify(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Slug {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lowercases, folds Turkish letters and joins words with single dashes.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.trim().chars() {
        let folded = match ch {
            'ç' | 'Ç' => Some('c'),
            'ğ' | 'Ğ' => Some('g'),
            'ı' | 'I' | 'İ' | 'i' => Some('i'),
            'ö' | 'Ö' => Some('o'),
            'ş' | 'Ş' => Some('s'),
            'ü' | 'Ü' => Some('u'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        };
        match folded {
            Some(c) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            }
            None => pending_dash = true,
        }
    }
    slug
}

/// Non-negative, finite price in the motorcycle's currency.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ISO-4217 style currency code, three uppercase ASCII letters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const DEFAULT: &'static str = "TRY";

    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = trim_and_require_non_empty(value, "currency")?.to_ascii_uppercase();
        if value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidValue(format!("currency: {value}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

string_enum!(
    /// Availability shown on catalog cards.
    StockStatus, "stock status", default = InStock, {
        InStock => "in_stock",
        LowStock => "low_stock",
        OutOfStock => "out_of_stock",
    }
);

impl StockStatus {
    /// Customer facing label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "Stokta",
            Self::LowStock => "Az Stok",
            Self::OutOfStock => "Stok Yok",
        }
    }
}

string_enum!(
    /// Horizontal alignment of slide copy.
    TextAlign, "text align", default = Left, {
        Left => "left",
        Center => "center",
        Right => "right",
    }
);

string_enum!(
    /// Visual style of the slide call-to-action button.
    ButtonVariant, "button variant", default = Primary, {
        Primary => "primary",
        Secondary => "secondary",
        Ghost => "ghost",
    }
);

string_enum!(
    /// Height preset of the prefooter banner.
    BannerHeight, "banner height", default = Md, {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
);

/// CSS hex colour, `#RGB` or `#RRGGBB`, stored uppercase.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = trim_and_require_non_empty(value, "text color")?;
        let digits = value.strip_prefix('#').unwrap_or("");
        if (digits.len() == 3 || digits.len() == 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            Ok(Self(value.to_ascii_uppercase()))
        } else {
            Err(TypeConstraintError::InvalidValue(format!("text color: {value}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#FFFFFF".to_string())
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

/// Opacity of the dark overlay drawn over a slide image, `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct OverlayOpacity(f64);

impl OverlayOpacity {
    pub const DEFAULT: f64 = 0.35;

    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange("overlay opacity"))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for OverlayOpacity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Link target: an absolute http(s) URL or a site path starting with `/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct LinkTarget(String);

impl LinkTarget {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = trim_and_require_non_empty(value, "link")?;
        let is_site_path = value.starts_with('/') && !value.starts_with("//");
        let is_web_url = (value.starts_with("http://") || value.starts_with("https://"))
            && value.as_str().validate_url();
        if is_site_path || is_web_url {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidUrl("link"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LinkTarget {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkTarget> for String {
    fn from(value: LinkTarget) -> Self {
        value.0
    }
}

/// Phone number as typed by a visitor; digits, spaces, `+`, `-` and parentheses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = trim_and_require_non_empty(value, "phone")?;
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if allowed && (7..=15).contains(&digits) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidValue(format!("phone: {value}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}
