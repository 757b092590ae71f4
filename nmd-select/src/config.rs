//! Control configuration and attribute handling.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::matcher::MatchStrategy;

/// Attributes the control reacts to, in the spelling hosts use.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    "id",
    "name",
    "required",
    "autofocus",
    "disabled",
    "form",
    "placeholder",
    "readonly",
    "input-class",
    "select-class",
    "max-size",
    "match-strategy",
];

/// Upper bound on the dropdown's visible row count.
///
/// Zero and negative bounds are accepted and mean no cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub struct MaxSize(usize);

impl MaxSize {
    pub fn new(rows: usize) -> Self {
        if rows == 0 {
            log::warn!("[config] max-size 0 does not cap the row count");
        }
        Self(rows)
    }

    /// Parse an attribute value. Only non-numeric input is rejected.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let rows: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidMaxSize(raw.to_string()))?;
        Ok(Self::from(rows))
    }

    /// The effective cap, if any.
    pub fn limit(self) -> Option<usize> {
        (self.0 > 0).then_some(self.0)
    }
}

impl From<i64> for MaxSize {
    fn from(rows: i64) -> Self {
        match usize::try_from(rows) {
            Ok(rows) => Self::new(rows),
            Err(_) if rows < 0 => {
                log::warn!("[config] max-size {} does not cap the row count", rows);
                Self(0)
            }
            Err(_) => Self(usize::MAX),
        }
    }
}

/// Settings of one control.
///
/// Pass-through fields (`id`, `name`, `form`, `placeholder`, `required`,
/// `autofocus`, the class names) are kept for the host to mirror onto its
/// own surfaces; the control only reads `disabled`, `readonly`, `max_size`
/// and `strategy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub form: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub autofocus: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub input_class: Option<String>,
    pub select_class: Option<String>,
    pub max_size: Option<MaxSize>,
    #[serde(rename = "match-strategy")]
    pub strategy: MatchStrategy,
}

impl SelectConfig {
    /// Apply an attribute change. `None` removes the attribute.
    ///
    /// Boolean attributes are true whenever present, whatever their value.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let owned = value.map(str::to_string);
        match name {
            "id" => self.id = owned,
            "name" => self.name = owned,
            "form" => self.form = owned,
            "placeholder" => self.placeholder = owned,
            "input-class" => self.input_class = owned,
            "select-class" => self.select_class = owned,
            "required" => self.required = value.is_some(),
            "autofocus" => self.autofocus = value.is_some(),
            "disabled" => self.disabled = value.is_some(),
            "readonly" => self.readonly = value.is_some(),
            "max-size" => self.max_size = value.map(MaxSize::parse).transpose()?,
            "match-strategy" => {
                self.strategy = value
                    .map(str::parse::<MatchStrategy>)
                    .transpose()?
                    .unwrap_or_default()
            }
            other => return Err(ConfigError::UnknownAttribute(other.to_string())),
        }
        log::debug!("[config] {} = {:?}", name, value);
        Ok(())
    }

    /// Disabled or read-only controls never open and ignore editing.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.readonly
    }
}
