use std::collections::BTreeMap;

use serde::Serialize;

use super::types::AddressType;
use crate::validation::{Fields, Schema, ViolationKind};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_PAGE: u32 = 1;

/// Address-book entry, as sent to both the create and update endpoints.
///
/// Senders must carry a `location_name`; only senders may be flagged as the
/// main warehouse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRequest {
    pub address_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub address_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_email: Option<String>,
    pub address_phone: String,
    pub address_line: String,
    pub address_country: String,
    pub address_city: String,
    pub address_district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_main_warehouse: Option<u8>,
}

pub type CreateAddressRequest = AddressRequest;
pub type UpdateAddressRequest = AddressRequest;

impl Schema for AddressRequest {
    const NAME: &'static str = "address book";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let address_type = fields.one_of::<AddressType>("address_type");
        let location_name = fields.optional("location_name");
        let address_name = fields.required("address_name");
        let address_email = fields.optional_email("address_email");
        let address_phone = fields.required("address_phone");
        let address_line = fields.required("address_line");
        let address_country = fields.required("address_country");
        let address_city = fields.required("address_city");
        let address_district = fields.required("address_district");
        let address_post_code = fields.optional("address_post_code");
        let is_main_warehouse = fields.optional_in_range("is_main_warehouse", None, Some(1));

        match address_type {
            Some(AddressType::Sender) if !fields.is_present("location_name") => {
                fields.violate(
                    "location_name",
                    ViolationKind::RequiredWhen("address_type is sender".to_string()),
                );
            }
            Some(AddressType::Recipient) if fields.is_present("is_main_warehouse") => {
                fields.violate(
                    "is_main_warehouse",
                    ViolationKind::NotAllowedWhen("address_type is recipient".to_string()),
                );
            }
            _ => {}
        }

        Some(Self {
            address_type: address_type?,
            location_name,
            address_name: address_name?,
            address_email,
            address_phone: address_phone?,
            address_line: address_line?,
            address_country: address_country?,
            address_city: address_city?,
            address_district: address_district?,
            address_post_code,
            is_main_warehouse,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetAllAddressRequest {
    pub limit: u32,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
}

impl Default for GetAllAddressRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            page: DEFAULT_PAGE,
            filters: None,
        }
    }
}

impl Schema for GetAllAddressRequest {
    const NAME: &'static str = "get all addresses";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            limit: fields
                .optional_in_range("limit", Some(1), None)
                .unwrap_or(DEFAULT_PAGE_LIMIT),
            page: fields
                .optional_in_range("page", Some(1), None)
                .unwrap_or(DEFAULT_PAGE),
            filters: fields.optional("filters"),
        })
    }
}
