use std::collections::BTreeMap;

use serde::Serialize;

use super::address::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::validation::{Fields, Schema};

/// Query shared by the carrier listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetAllCarriersRequest {
    pub limit: u32,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
}

impl Default for GetAllCarriersRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            page: DEFAULT_PAGE,
            filters: None,
        }
    }
}

impl Schema for GetAllCarriersRequest {
    const NAME: &'static str = "get carriers";

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
