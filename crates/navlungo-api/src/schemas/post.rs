use serde::Serialize;

use super::types::CarrierId;
use crate::validation::{Fields, Schema};

/// Identity and location of a party to a shipment. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    #[serde(rename = "addressId", skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

impl Schema for Address {
    const NAME: &'static str = "address";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            address_id: fields.optional("addressId"),
            name: fields.optional("name"),
            phone: fields.optional("phone"),
            email: fields.optional_email("email"),
            address: fields.optional("address"),
            country: fields.optional("country"),
            city: fields.optional("city"),
            district: fields.optional("district"),
            post_code: fields.optional("post_code"),
            latitude: fields.optional("latitude"),
            longitude: fields.optional("longitude"),
        })
    }
}

/// Sender of a post, referenced by an address-book id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SenderAddress {
    #[serde(rename = "addressId", skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
}

impl Schema for SenderAddress {
    const NAME: &'static str = "sender address";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            address_id: fields.optional("addressId"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetails {
    pub desi: f64,
    pub package_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Schema for PostDetails {
    const NAME: &'static str = "post details";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let desi = fields.required_in_range("desi", Some(0.0), None);
        let package_count = fields.required_in_range("package_count", Some(1), None);
        let price = fields.optional("price");
        let note = fields.optional("note");

        Some(Self {
            desi: desi?,
            package_count: package_count?,
            price,
            note,
        })
    }
}

/// One shippable unit of a [`CreatePostRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostItem {
    pub reference_id: String,
    pub carrier_id: CarrierId,
    pub post_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_payment_type: Option<String>,
    pub sender: SenderAddress,
    pub recipient: Address,
    pub post: PostDetails,
    pub barcode_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_4: Option<String>,
}

impl Schema for PostItem {
    const NAME: &'static str = "post item";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let reference_id = fields.required("reference_id");
        let carrier_id = fields.one_of("carrier_id");
        let post_type = fields.required("post_type");
        let cod_payment_type = fields.optional("cod_payment_type");
        let sender = fields.nested("sender");
        let recipient = fields.nested("recipient");
        let post = fields.nested("post");
        let barcode_format = fields.required("barcode_format");
        let custom_data_1 = fields.optional("custom_data_1");
        let custom_data_2 = fields.optional("custom_data_2");
        let custom_data_3 = fields.optional("custom_data_3");
        let custom_data_4 = fields.optional("custom_data_4");

        Some(Self {
            reference_id: reference_id?,
            carrier_id: carrier_id?,
            post_type: post_type?,
            cod_payment_type,
            sender: sender?,
            recipient: recipient?,
            post: post?,
            barcode_format: barcode_format?,
            custom_data_1,
            custom_data_2,
            custom_data_3,
            custom_data_4,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub posts: Vec<PostItem>,
}

impl Schema for CreatePostRequest {
    const NAME: &'static str = "create post";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let platform = fields.optional("platform");
        let posts = fields.non_empty_list("posts");

        Some(Self {
            platform,
            posts: posts?,
        })
    }
}

/// Partial overrides for an existing post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePostRequest {
    pub post_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_4: Option<String>,
}

impl Schema for UpdatePostRequest {
    const NAME: &'static str = "update post";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let post_number = fields.required("post_number");
        let sender = fields.optional_nested("sender");
        let recipient = fields.optional_nested("recipient");
        let post = fields.optional_nested("post");
        let barcode_format = fields.optional("barcode_format");
        let custom_data_1 = fields.optional("custom_data_1");
        let custom_data_2 = fields.optional("custom_data_2");
        let custom_data_3 = fields.optional("custom_data_3");
        let custom_data_4 = fields.optional("custom_data_4");

        Some(Self {
            post_number: post_number?,
            sender,
            recipient,
            post,
            barcode_format,
            custom_data_1,
            custom_data_2,
            custom_data_3,
            custom_data_4,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelPostRequest {
    pub post_number: String,
}

impl Schema for CancelPostRequest {
    const NAME: &'static str = "cancel post";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            post_number: fields.required("post_number")?,
        })
    }
}
