use cumulus_sdk::resources::is_subnet::TYPE_TOKEN;
use serde_json::{Map, Value, json};

use crate::error::ProvisionerError;
use crate::kind::{ProviderEnv, ResourceKind};
use crate::kinds::vpc_style_id;
use crate::validate::{self, Fields, Ipv4Cidr, RESERVED_ADDRESSES_PER_SUBNET};

pub struct IsSubnetKind;

impl ResourceKind for IsSubnetKind {
    fn type_token(&self) -> &'static str {
        TYPE_TOKEN
    }

    fn label(&self) -> &'static str {
        "Subnet"
    }

    fn validate(&self, fields: &Fields<'_>) -> Result<(), ProvisionerError> {
        let name = fields.required_str("name")?;
        fields.check("name", name, validate::vpc_name)?;
        fields.required_str("vpc")?;

        let zone = fields.required_str("zone")?;
        fields.check("zone", zone, validate::zone)?;

        // The API accepts either an explicit block or an address count; this
        // engine only supports explicit blocks.
        let cidr = fields.required_str("ipv4CidrBlock")?;
        fields.check("ipv4CidrBlock", cidr, |raw| Ipv4Cidr::parse(raw).map(|_| ()))?;

        if fields.optional_str("resourceGroup")?.is_some_and(str::is_empty) {
            return Err(fields.error("resourceGroup", "must not be empty"));
        }
        Ok(())
    }

    fn defaults(&self, inputs: &Map<String, Value>, env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        if !inputs.contains_key("resourceGroup") {
            out.insert("resourceGroup".into(), json!(env.default_resource_group));
        }
        out
    }

    fn new_id(&self, _inputs: &Map<String, Value>, _env: &ProviderEnv) -> String {
        vpc_style_id("0717")
    }

    fn computed(&self, _id: &str, inputs: &Map<String, Value>, _env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        let available = inputs
            .get("ipv4CidrBlock")
            .and_then(Value::as_str)
            .and_then(|raw| Ipv4Cidr::parse(raw).ok())
            .map(|cidr| cidr.address_count().saturating_sub(RESERVED_ADDRESSES_PER_SUBNET));
        if let Some(available) = available {
            out.insert("availableIpv4AddressCount".into(), json!(available));
        }
        out.insert("status".into(), json!("available"));
        out
    }

    fn computed_keys(&self) -> &'static [&'static str] {
        &["availableIpv4AddressCount", "status"]
    }
}
