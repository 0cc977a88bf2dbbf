use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// Carriers known to the API.
///
/// Payloads name a carrier by its symbolic name (`"SURAT_KARGO"`); the wire
/// format carries the numeric code returned by [`CarrierId::code`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierId {
    TasiyiciAyarlari,
    SuratKargo,
    Hepsijet,
    KolayGelsin,
    Scotty,
    ArasKargo,
    PttKargo,
    Vigo,
    HepsijetXl,
}

impl CarrierId {
    pub fn code(self) -> u8 {
        match self {
            CarrierId::TasiyiciAyarlari => 1,
            CarrierId::SuratKargo => 9,
            CarrierId::Hepsijet => 10,
            CarrierId::KolayGelsin => 11,
            CarrierId::Scotty => 12,
            CarrierId::ArasKargo => 13,
            CarrierId::PttKargo => 14,
            CarrierId::Vigo => 15,
            CarrierId::HepsijetXl => 16,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        use strum::IntoEnumIterator;

        Self::iter().find(|carrier| carrier.code() == code)
    }
}

impl Serialize for CarrierId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Output encoding of a shipping label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BarcodeType {
    Pdf,
    Html,
    Zpl,
}

/// Role of an address-book entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AddressType {
    Sender,
    Recipient,
}
