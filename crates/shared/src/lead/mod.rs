use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Fields shared by both lead forms, in rendering order.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Membership,
    Message,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Foundation,
    Curated,
    Bespoke,
    #[default]
    Consultation,
}

impl Membership {
    pub fn label(&self) -> &'static str {
        match self {
            Membership::Foundation => "Foundation - £299/month",
            Membership::Curated => "Curated - £599/month",
            Membership::Bespoke => "Bespoke - £1,299/month",
            Membership::Consultation => "Just a consultation",
        }
    }
}
