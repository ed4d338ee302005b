//! Static configuration adapter
//!
//! Implements `ConfigSource` over a table of entries, typically a `const`
//! array baked into the firmware image.

use crate::ports::config::ConfigSource;

/// One `(module, instance, key) = value` setting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigEntry<'a> {
    pub module: &'a str,
    pub instance: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> ConfigEntry<'a> {
    pub const fn new(module: &'a str, instance: &'a str, key: &'a str, value: &'a str) -> Self {
        Self {
            module,
            instance,
            key,
            value,
        }
    }
}

/// Table-backed configuration source
///
/// When a key appears more than once the last entry wins, matching how a
/// config file read top to bottom would behave.
///
/// ```ignore
/// const CONFIG: &[ConfigEntry<'static>] = &[
///     ConfigEntry::new("temperature_control", "hotend", "thermistor_pin", "0.24"),
///     ConfigEntry::new("temperature_control", "hotend", "ampmod1_pin", "1.20"),
/// ];
///
/// sensor.update_config(&StaticConfig::new(CONFIG), "temperature_control", "hotend")?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StaticConfig<'a> {
    entries: &'a [ConfigEntry<'a>],
}

impl<'a> StaticConfig<'a> {
    pub const fn new(entries: &'a [ConfigEntry<'a>]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for StaticConfig<'_> {
    fn lookup(&self, module: &str, instance: &str, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.module == module && e.instance == instance && e.key == key)
            .map(|e| e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: &[ConfigEntry<'static>] = &[
        ConfigEntry::new("temperature_control", "hotend", "thermistor_pin", "0.24"),
        ConfigEntry::new("temperature_control", "bed", "thermistor_pin", "0.23"),
        ConfigEntry::new("temperature_control", "hotend", "thermistor_pin", "0.25"),
    ];

    #[test]
    fn test_lookup_by_instance() {
        let config = StaticConfig::new(ENTRIES);
        assert_eq!(config.lookup("temperature_control", "bed", "thermistor_pin"), Some("0.23"));
        assert_eq!(config.lookup("temperature_control", "bed", "slope"), None);
        assert_eq!(config.lookup("switch", "bed", "thermistor_pin"), None);
    }

    #[test]
    fn test_last_entry_wins() {
        let config = StaticConfig::new(ENTRIES);
        assert_eq!(
            config.lookup("temperature_control", "hotend", "thermistor_pin"),
            Some("0.25")
        );
        assert_eq!(config.len(), 3);
    }
}
