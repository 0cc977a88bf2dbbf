use serde::Serialize;

use super::types::BarcodeType;
use crate::validation::{Fields, Schema};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetBarcodeRequest {
    pub post_number: String,
    pub barcode_type: BarcodeType,
}

impl Schema for GetBarcodeRequest {
    const NAME: &'static str = "get barcode";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let post_number = fields.required("post_number");
        let barcode_type = fields.one_of("barcode_type");

        Some(Self {
            post_number: post_number?,
            barcode_type: barcode_type?,
        })
    }
}
