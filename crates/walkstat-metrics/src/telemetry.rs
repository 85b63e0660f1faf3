//! Performance instruments for timed passes.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

/// Options for preparing an instrument.
#[derive(Debug, Clone, Default)]
pub struct InstrumentationOptions {
    /// Instrument identity; auto-generated when absent.
    pub identity: Option<String>,
    /// Opaque context carried with the measurement.
    pub baggage: Option<Value>,
}

impl InstrumentationOptions {
    /// Options with an explicit identity.
    pub fn named(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            baggage: None,
        }
    }

    /// Attach baggage to the options.
    pub fn with_baggage(mut self, baggage: Value) -> Self {
        self.baggage = Some(baggage);
        self
    }
}

/// A started measurement; pass it back to [`Telemetry::measure`] to finish.
#[derive(Debug)]
pub struct PendingInstrument {
    name: String,
    started: Instant,
    baggage: Option<Value>,
}

impl PendingInstrument {
    /// The resolved instrument name (prefix applied).
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One finished measurement.
#[derive(Debug, Clone, Serialize)]
pub struct Instrument {
    /// Resolved instrument name.
    pub name: String,
    /// Elapsed time between prepare and measure.
    pub duration: Duration,
    /// Opaque context carried from the options.
    pub baggage: Option<Value>,
}

/// Collector of performance instruments.
#[derive(Debug, Default)]
pub struct Telemetry {
    prefix: Option<String>,
    instruments: Vec<Instrument>,
}

impl Telemetry {
    /// Create a collector without a name prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector that prefixes every instrument name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            instruments: Vec::new(),
        }
    }

    /// Start a measurement. The caller is responsible for finishing it with
    /// [`Telemetry::measure`].
    pub fn prepare_instrument(&self, options: InstrumentationOptions) -> PendingInstrument {
        let identity = options
            .identity
            .unwrap_or_else(|| format!("instrument_{}", self.instruments.len()));
        let name = match &self.prefix {
            Some(prefix) => format!("{prefix}{identity}"),
            None => identity,
        };
        PendingInstrument {
            name,
            started: Instant::now(),
            baggage: options.baggage,
        }
    }

    /// Finish a measurement and keep it.
    pub fn measure(&mut self, pending: PendingInstrument) -> Instrument {
        let instrument = Instrument {
            name: pending.name,
            duration: pending.started.elapsed(),
            baggage: pending.baggage,
        };
        self.instruments.push(instrument.clone());
        instrument
    }

    /// All finished measurements in completion order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measure_records_instrument() {
        let mut telemetry = Telemetry::new();
        let pending = telemetry.prepare_instrument(InstrumentationOptions::named("walk"));
        let instrument = telemetry.measure(pending);

        assert_eq!(instrument.name, "walk");
        assert_eq!(telemetry.instruments().len(), 1);
    }

    #[test]
    fn test_prefix_and_generated_identity() {
        let mut telemetry = Telemetry::with_prefix("walkstat_");
        let pending = telemetry.prepare_instrument(InstrumentationOptions::default());
        assert_eq!(pending.name(), "walkstat_instrument_0");
        telemetry.measure(pending);

        let pending = telemetry.prepare_instrument(InstrumentationOptions::default());
        assert_eq!(pending.name(), "walkstat_instrument_1");
    }

    #[test]
    fn test_baggage_travels_with_measurement() {
        let mut telemetry = Telemetry::new();
        let pending = telemetry.prepare_instrument(
            InstrumentationOptions::named("scan").with_baggage(json!({"root": "/repo"})),
        );
        let instrument = telemetry.measure(pending);
        assert_eq!(instrument.baggage, Some(json!({"root": "/repo"})));
    }
}
