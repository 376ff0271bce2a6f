// ── Multicast-group domain types ──
//
// The multicast form edits a draft of raw strings; `MulticastGroupDraft::
// build` is the single parse-and-validate step that turns it into a
// well-typed group (or a list of per-field errors for the form to show).

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;

// ── Enumerations ────────────────────────────────────────────────────

/// LoRaWAN regional-parameters region.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
pub enum Region {
    EU868,
    US915,
    CN779,
    EU433,
    AU915,
    CN470,
    AS923,
    KR920,
    IN865,
    RU864,
}

/// Device class the group transmits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MulticastGroupType {
    ClassB,
    ClassC,
}

/// Scheduling strategy for Class-C downlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassCSchedulingType {
    Delay,
    GpsTime,
}

// ── Hex-validated newtypes ──────────────────────────────────────────

/// A 32-bit device address, 8 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevAddr(String);

/// A 128-bit AES key, 32 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AesKey(String);

fn parse_hex(raw: &str, digits: usize, what: &str) -> Result<String, CoreError> {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.len() != digits || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::validation(format!(
            "'{raw}' is not a valid {what} (expected {digits} hex digits)"
        )));
    }
    Ok(cleaned)
}

impl DevAddr {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Ok(Self(parse_hex(raw, 8, "device address")?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AesKey {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Ok(Self(parse_hex(raw, 32, "AES key")?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DevAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Group + draft ───────────────────────────────────────────────────

/// A validated multicast group, ready to submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticastGroup {
    /// Server-assigned id; `None` until created.
    pub id: Option<String>,
    pub application_id: String,
    pub name: String,
    pub mc_addr: DevAddr,
    pub mc_nwk_s_key: AesKey,
    pub mc_app_s_key: AesKey,
    pub f_cnt: u32,
    pub dr: u8,
    pub frequency_hz: u32,
    pub region: Region,
    pub group_type: MulticastGroupType,
    /// Only meaningful for Class-B groups.
    pub class_b_ping_slot_period: Option<u32>,
    pub class_c_scheduling_type: ClassCSchedulingType,
}

impl MulticastGroup {
    /// Convert to the wire request shape.
    pub fn to_request(&self) -> loradeck_api::models::MulticastGroupRequest {
        loradeck_api::models::MulticastGroupRequest {
            application_id: self.application_id.clone(),
            name: self.name.clone(),
            mc_addr: self.mc_addr.as_str().to_owned(),
            mc_nwk_s_key: self.mc_nwk_s_key.as_str().to_owned(),
            mc_app_s_key: self.mc_app_s_key.as_str().to_owned(),
            f_cnt: self.f_cnt,
            dr: self.dr,
            frequency: self.frequency_hz,
            region: self.region.to_string(),
            group_type: self.group_type.to_string(),
            class_b_ping_slot_period: match self.group_type {
                MulticastGroupType::ClassB => self.class_b_ping_slot_period,
                MulticastGroupType::ClassC => None,
            },
            class_c_scheduling_type: self.class_c_scheduling_type.to_string(),
        }
    }
}

/// A per-field validation failure, addressed to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Raw form state for a multicast group.
#[derive(Debug, Clone, Default)]
pub struct MulticastGroupDraft {
    pub id: Option<String>,
    pub application_id: String,
    pub name: String,
    pub mc_addr: String,
    pub mc_nwk_s_key: String,
    pub mc_app_s_key: String,
    pub f_cnt: String,
    pub dr: String,
    pub frequency_hz: String,
    pub region: Option<Region>,
    pub group_type: Option<MulticastGroupType>,
    pub class_b_ping_slot_period: String,
    pub class_c_scheduling_type: Option<ClassCSchedulingType>,
}

impl MulticastGroupDraft {
    /// Parse and validate every field. Collects all failures so the
    /// form can mark each offending field, rather than stopping at the
    /// first.
    #[allow(clippy::too_many_lines)]
    pub fn build(&self) -> Result<MulticastGroup, Vec<FieldError>> {
        let mut errors = Vec::new();

        let fail = |field: &'static str, message: String| FieldError { field, message };

        if self.name.trim().is_empty() {
            errors.push(fail("name", "please enter a name".into()));
        }

        let mc_addr = DevAddr::parse(&self.mc_addr)
            .map_err(|e| errors.push(fail("mc_addr", e.to_string())))
            .ok();
        let mc_nwk_s_key = AesKey::parse(&self.mc_nwk_s_key)
            .map_err(|e| errors.push(fail("mc_nwk_s_key", e.to_string())))
            .ok();
        let mc_app_s_key = AesKey::parse(&self.mc_app_s_key)
            .map_err(|e| errors.push(fail("mc_app_s_key", e.to_string())))
            .ok();

        let f_cnt = self
            .f_cnt
            .trim()
            .parse::<u32>()
            .map_err(|_| errors.push(fail("f_cnt", "frame-counter must be a non-negative integer".into())))
            .ok();

        let dr = match self.dr.trim().parse::<u8>() {
            Ok(dr) if dr <= 15 => Some(dr),
            _ => {
                errors.push(fail("dr", "data-rate must be in 0..=15".into()));
                None
            }
        };

        let frequency_hz = self
            .frequency_hz
            .trim()
            .parse::<u32>()
            .map_err(|_| errors.push(fail("frequency_hz", "frequency must be an integer in Hz".into())))
            .ok();

        let region = self.region.map_or_else(
            || {
                errors.push(fail("region", "please select a region".into()));
                None
            },
            Some,
        );
        let group_type = self.group_type.map_or_else(
            || {
                errors.push(fail("group_type", "please select a group type".into()));
                None
            },
            Some,
        );

        // Ping-slot period is required for Class-B groups and ignored
        // otherwise (mirrors the conditional form field).
        let class_b_ping_slot_period = match group_type {
            Some(MulticastGroupType::ClassB) => {
                match self.class_b_ping_slot_period.trim().parse::<u32>() {
                    Ok(p) => Some(p),
                    Err(_) => {
                        errors.push(fail(
                            "class_b_ping_slot_period",
                            "Class-B groups need a ping-slot periodicity".into(),
                        ));
                        None
                    }
                }
            }
            _ => None,
        };

        let class_c_scheduling_type = self
            .class_c_scheduling_type
            .unwrap_or(ClassCSchedulingType::Delay);

        if !errors.is_empty() {
            return Err(errors);
        }

        // All parses succeeded once errors is empty.
        match (mc_addr, mc_nwk_s_key, mc_app_s_key, f_cnt, dr, frequency_hz, region, group_type) {
            (
                Some(mc_addr),
                Some(mc_nwk_s_key),
                Some(mc_app_s_key),
                Some(f_cnt),
                Some(dr),
                Some(frequency_hz),
                Some(region),
                Some(group_type),
            ) => Ok(MulticastGroup {
                id: self.id.clone(),
                application_id: self.application_id.clone(),
                name: self.name.trim().to_owned(),
                mc_addr,
                mc_nwk_s_key,
                mc_app_s_key,
                f_cnt,
                dr,
                frequency_hz,
                region,
                group_type,
                class_b_ping_slot_period,
                class_c_scheduling_type,
            }),
            _ => Err(vec![FieldError {
                field: "form",
                message: "form is incomplete".into(),
            }]),
        }
    }
}
