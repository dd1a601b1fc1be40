use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{FramedError, FramedResult},
    validation::{require_text, validate_email, validate_url},
};

/// Largest price a NUMERIC(8, 2) column holds.
fn max_price() -> Decimal {
    Decimal::new(99_999_999, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn validate_price(price: Decimal) -> FramedResult<()> {
    if price.is_sign_negative() || price > max_price() || price.scale() > 2 {
        return Err(FramedError::Validation(
            "Price must be a non-negative amount with at most 6 integer digits and 2 decimals"
                .to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Name", &self.name, 100)?;
        validate_price(self.price)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateServiceRequest {
    pub fn validate(&self) -> FramedResult<()> {
        if let Some(name) = &self.name {
            require_text("Name", name, 100)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn apply(&self, service: &mut Service) {
        if let Some(name) = &self.name {
            service.name = name.clone();
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(description) = &self.description {
            service.description = description.clone();
        }
        if let Some(is_active) = self.is_active {
            service.is_active = is_active;
        }
    }
}

/// Singleton record with the photographer's contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub title: String,
    pub phone: String,
    pub email: String,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub vk: Option<String>,
    pub about_text: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Photographer".to_string(),
            phone: String::new(),
            email: String::new(),
            instagram: None,
            telegram: None,
            whatsapp: None,
            vk: None,
            about_text: String::new(),
        }
    }
}

impl SiteSettings {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Title", &self.title, 200)?;
        if self.phone.chars().count() > 20 {
            return Err(FramedError::Validation(
                "Phone must be at most 20 characters".to_string(),
            ));
        }
        if !self.email.is_empty() {
            validate_email("Email", &self.email)?;
        }
        let links = [
            ("Instagram", &self.instagram),
            ("Telegram", &self.telegram),
            ("WhatsApp", &self.whatsapp),
            ("VKontakte", &self.vk),
        ];
        for (field, link) in links {
            if let Some(link) = link {
                validate_url(field, link)?;
            }
        }
        Ok(())
    }
}

/// Message sent from the contacts page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Name", &self.name, 100)?;
        validate_email("Email", &self.email)?;
        require_text("Message", &self.message, 5000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: String,
}
