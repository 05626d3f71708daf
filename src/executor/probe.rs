//! Probe value generation

use tracing::debug;

use crate::models::{ParamValue, DEFAULT_PROBE_PREFIX};

/// Issues run-unique probe values.
///
/// Uniqueness comes from the counter; the random suffix only makes probes
/// from separate runs easy to tell apart in reports.
#[derive(Debug)]
pub struct ProbeGenerator {
    prefix: String,
    counter: u64,
}

impl ProbeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn next_probe(&mut self) -> ParamValue {
        self.counter += 1;
        let suffix = rand::random::<u32>();
        let probe = format!("{}{:08x}.{:08x}", self.prefix, self.counter, suffix);
        debug!("Issued probe {}", probe);
        ParamValue::String(probe)
    }

    /// Number of probes issued so far
    pub fn issued(&self) -> u64 {
        self.counter
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for ProbeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_probes_are_unique() {
        let mut probes = ProbeGenerator::default();
        let seen: HashSet<String> = (0..1000)
            .map(|_| probes.next_probe().as_str().unwrap().to_string())
            .collect();

        assert_eq!(seen.len(), 1000);
        assert_eq!(probes.issued(), 1000);
    }

    #[test]
    fn test_probe_format() {
        let mut probes = ProbeGenerator::new("x-");
        let probe = probes.next_probe();
        let text = probe.as_str().unwrap();

        assert!(text.starts_with("x-00000001."));
        assert_eq!(text.len(), "x-".len() + 8 + 1 + 8);
    }
}
