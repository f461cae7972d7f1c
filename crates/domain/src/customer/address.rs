//! Address value object.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Postal address of a customer.
///
/// Immutable once built; replace the whole value to change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressData")]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

#[derive(Deserialize)]
struct AddressData {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl TryFrom<AddressData> for Address {
    type Error = DomainError;

    fn try_from(data: AddressData) -> Result<Self> {
        Address::new(data.street, data.number, data.zip, data.city)
    }
}

impl Address {
    /// Creates an address, checking that every part is present.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<()> {
        if self.street.is_empty() {
            return Err(DomainError::StreetRequired);
        }
        if self.number == 0 {
            return Err(DomainError::NumberRequired);
        }
        if self.zip.is_empty() {
            return Err(DomainError::ZipRequired);
        }
        if self.city.is_empty() {
            return Err(DomainError::CityRequired);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.number, self.zip, self.city
        )
    }
}
