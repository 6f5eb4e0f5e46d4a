//! Grid frequency gauge example.
//!
//! Demonstrates building a gauge from TOML configuration, zeroing it and
//! feeding it frequency readings through a mapper while a simulated timer
//! drives the ticks.
//!
//! This example uses stand-in pins and timer so it runs without hardware.
//!
//! Run with: `cargo run --example frequency_gauge`

use gauge_stepper::{
    parse_config, GaugeBuilder, GpioPulseEmitter, Microseconds, PeriodicTimer, PositionMapper,
    SharedGauge,
};

/// Delay that only accounts for the time it would wait.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // In real code, this would busy-wait on a hardware timer
    }
}

/// Output pin that remembers its level.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

/// Periodic timer stand-in. The main loop fires it and adds up the elapsed time.
#[derive(Default)]
struct SimTimer {
    period: Option<Microseconds>,
}

impl PeriodicTimer for SimTimer {
    fn start_periodic(&mut self, period: Microseconds) {
        self.period = Some(period);
    }

    fn stop(&mut self) {
        self.period = None;
    }
}

const CONFIG: &str = r#"
[gauges.frequency]
name = "Grid frequency"
total_steps = 3780

[mappers.grid]
gauge = "frequency"
range_min = 49.8
range_max = 50.2
step_min = 3250
step_max = 3500
"#;

type Emitter = GpioPulseEmitter<MockPin, MockPin, MockPin, MockDelay>;

/// Fire ticks until the gauge comes to rest, returning simulated microseconds.
fn run_until_stopped(gauge: &SharedGauge<'_, Emitter, SimTimer>) -> u64 {
    let mut elapsed = 0u64;
    while !gauge.stopped() {
        let period = gauge
            .with_driver(|driver| driver.timer().period)
            .flatten()
            .map_or(0, |p| u64::from(p.value()));
        elapsed += period;
        gauge.on_tick();
    }
    elapsed
}

fn main() -> gauge_stepper::Result<()> {
    println!("=== Grid Frequency Gauge Example ===\n");

    let config = parse_config(CONFIG)?;
    let gauge_config = config.gauge("frequency").expect("gauge in config");
    let profile = gauge_config.profile()?;

    println!(
        "Gauge '{}': {} steps, max velocity {}",
        gauge_config.name,
        gauge_config.total_steps,
        profile.max_velocity()
    );
    for entry in profile.entries() {
        println!(
            "  up to velocity {:>3}: {:>4} us per step",
            entry.velocity_ceiling,
            entry.period.value()
        );
    }

    let emitter = GpioPulseEmitter::new(MockPin::new(), MockPin::new(), MockPin::new(), MockDelay)
        .with_config(gauge_config);

    let driver = GaugeBuilder::new()
        .from_config(&config, "frequency")?
        .emitter(emitter)
        .timer(SimTimer::default())
        .profile(&profile)
        .build()?;

    let gauge = SharedGauge::new();
    gauge.install(driver);

    println!("\n=== Zeroing ===");
    gauge.zero()?;
    println!("Needle parked at step 0");

    println!("\n=== Following readings ===");
    let mut mapper = PositionMapper::from_config(config.mapper("grid").expect("mapper in config"))?;
    let readings = [50.00, 50.00, 50.05, 49.92, 51.30, f32::NAN, 49.80];

    for reading in readings {
        let mut sink = &gauge;
        match mapper.apply(reading, &mut sink) {
            Some(step) => {
                let elapsed = run_until_stopped(&gauge);
                println!(
                    "{:>6.2} Hz -> step {:>4} (settled in {:.1} ms)",
                    reading,
                    step,
                    elapsed as f64 / 1000.0
                );
            }
            None => println!("{:>6.2} Hz -> unchanged", reading),
        }
    }

    if let Some(state) = gauge.with_driver(|driver| driver.state()) {
        println!("\nFinal state: {:?}", state);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
