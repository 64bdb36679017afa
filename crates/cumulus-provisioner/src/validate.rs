//! Field checks the IBM Cloud API would otherwise reject at create time.

use std::net::Ipv4Addr;

use cumulus_sdk::{UNKNOWN_VALUE, Urn};
use serde_json::{Map, Value};

use crate::error::ProvisionerError;

/// Regions that host VPC infrastructure.
pub const VPC_REGIONS: &[&str] = &[
    "us-south", "us-east", "ca-tor", "br-sao", "eu-gb", "eu-de", "eu-es", "jp-tok", "jp-osa",
    "au-syd",
];

/// Longest name the VPC API accepts for VPCs and subnets.
pub const MAX_VPC_NAME_LEN: usize = 63;

/// Longest resource group name the resource manager accepts.
pub const MAX_RESOURCE_GROUP_NAME_LEN: usize = 40;

/// A parsed IPv4 CIDR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Cidr {
    pub network: Ipv4Addr,
    pub prefix: u8,
}

impl Ipv4Cidr {
    /// Subnets smaller than /29 or larger than /8 are refused.
    pub const PREFIX_RANGE: std::ops::RangeInclusive<u8> = 8..=29;

    pub fn parse(raw: &str) -> Result<Self, String> {
        let (addr, prefix) = raw
            .split_once('/')
            .ok_or_else(|| format!("'{raw}' is not in CIDR notation"))?;
        let network: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("'{addr}' is not an IPv4 address"))?;
        // `u8::from_str` also takes "+24" and "024".
        let canonical = !prefix.is_empty()
            && prefix.bytes().all(|b| b.is_ascii_digit())
            && (prefix == "0" || !prefix.starts_with('0'));
        let prefix: u8 = prefix
            .parse()
            .ok()
            .filter(|_| canonical)
            .ok_or_else(|| format!("'{prefix}' is not a prefix length"))?;
        if !Self::PREFIX_RANGE.contains(&prefix) {
            return Err(format!(
                "prefix /{prefix} is outside /{}../{}",
                Self::PREFIX_RANGE.start(),
                Self::PREFIX_RANGE.end()
            ));
        }

        let mask = u32::MAX << (32 - u32::from(prefix));
        if u32::from(network) & !mask != 0 {
            return Err(format!("'{raw}' has host bits set"));
        }
        Ok(Self { network, prefix })
    }

    pub fn address_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }
}

/// Addresses the VPC service reserves in every subnet.
pub const RESERVED_ADDRESSES_PER_SUBNET: u64 = 5;

/// Name rules shared by VPCs and subnets: lowercase letters, digits and
/// hyphens, starting with a letter and not ending with a hyphen.
pub fn vpc_name(raw: &str) -> Result<(), String> {
    if raw.is_empty() || raw.len() > MAX_VPC_NAME_LEN {
        return Err(format!("must be 1-{MAX_VPC_NAME_LEN} characters"));
    }
    if !raw.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(format!("'{raw}' must start with a lowercase letter"));
    }
    if raw.ends_with('-') {
        return Err(format!("'{raw}' must not end with a hyphen"));
    }
    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(format!("'{raw}' contains '{bad}'"));
    }
    Ok(())
}

/// Letters, digits, spaces, hyphens and underscores; no leading or
/// trailing space.
pub fn resource_group_name(raw: &str) -> Result<(), String> {
    if raw.is_empty() || raw.len() > MAX_RESOURCE_GROUP_NAME_LEN {
        return Err(format!(
            "must be 1-{MAX_RESOURCE_GROUP_NAME_LEN} characters"
        ));
    }
    if raw.starts_with(' ') || raw.ends_with(' ') {
        return Err(format!("'{raw}' has leading or trailing spaces"));
    }
    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_')))
    {
        return Err(format!("'{raw}' contains '{bad}'"));
    }
    Ok(())
}

/// `<region>-<n>` where n is 1..=3.
pub fn zone(raw: &str) -> Result<(), String> {
    let (region, number) = raw
        .rsplit_once('-')
        .ok_or_else(|| format!("'{raw}' is not a zone"))?;
    if !VPC_REGIONS.contains(&region) {
        return Err(format!("unknown region '{region}'"));
    }
    match number {
        "1" | "2" | "3" => Ok(()),
        _ => Err(format!("'{raw}' is not a zone of {region}")),
    }
}

pub fn is_unknown(value: &Value) -> bool {
    value.as_str() == Some(UNKNOWN_VALUE)
}

/// Accessor over one request's inputs that attaches the URN to every error.
pub struct Fields<'a> {
    pub urn: &'a Urn,
    pub inputs: &'a Map<String, Value>,
    /// Unknown inputs are only legal while previewing.
    pub dry_run: bool,
}

impl<'a> Fields<'a> {
    pub fn error(&self, field: &str, message: impl Into<String>) -> ProvisionerError {
        ProvisionerError::validation(self.urn, field, message)
    }

    /// `Ok(None)` when absent, or unknown during preview.
    pub fn optional_str(&self, field: &str) -> Result<Option<&'a str>, ProvisionerError> {
        match self.inputs.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(v) if is_unknown(v) => {
                if self.dry_run {
                    Ok(None)
                } else {
                    Err(self.error(field, "value is still unknown during apply"))
                }
            }
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.error(field, format!("expected a string, got {other}"))),
        }
    }

    /// Like [`Fields::optional_str`], but absence is an error.
    pub fn required_str(&self, field: &str) -> Result<Option<&'a str>, ProvisionerError> {
        if !self.inputs.contains_key(field) {
            return Err(self.error(field, "is required"));
        }
        let value = self.optional_str(field)?;
        if value.is_some_and(str::is_empty) {
            return Err(self.error(field, "must not be empty"));
        }
        Ok(value)
    }

    pub fn check(
        &self,
        field: &str,
        value: Option<&str>,
        rule: impl FnOnce(&str) -> Result<(), String>,
    ) -> Result<(), ProvisionerError> {
        match value {
            Some(v) => rule(v).map_err(|msg| self.error(field, msg)),
            None => Ok(()),
        }
    }

    /// Tags must be a list of non-empty strings.
    pub fn tags(&self) -> Result<(), ProvisionerError> {
        match self.inputs.get("tags") {
            None | Some(Value::Null) => Ok(()),
            Some(v) if is_unknown(v) && self.dry_run => Ok(()),
            Some(Value::Array(items)) => {
                for item in items {
                    match item.as_str() {
                        Some(tag) if !tag.is_empty() && tag.len() <= 128 => {}
                        _ => return Err(self.error("tags", format!("invalid tag {item}"))),
                    }
                }
                Ok(())
            }
            Some(other) => Err(self.error("tags", format!("expected a list, got {other}"))),
        }
    }
}
