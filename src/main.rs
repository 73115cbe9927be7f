//! Decision wheel command-line demo
//!
//! Spins a wheel of the given options on a simulated 60 fps clock and
//! prints where it lands. The browser build is driven through
//! `WheelWidget` instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::cell::RefCell;
    use std::process::ExitCode;
    use std::rc::Rc;

    use decision_wheel::consts::*;
    use decision_wheel::history::SpinRecord;
    use decision_wheel::platform::FrameClock;
    use decision_wheel::{LogHooks, SpinEngine, SpinHistory, WheelOption, WheelSettings};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    const USAGE: &str = "\
Usage: decision-wheel [--seed N] [--spins K] [--svg PATH] OPTION OPTION [OPTION...]
       decision-wheel [--seed N] [--spins K] [--svg PATH] --options-json PATH

Settings are read from the JSON file named by $DECISION_WHEEL_SETTINGS.";

    #[derive(Debug, Default)]
    struct Args {
        seed: Option<u64>,
        spins: u32,
        svg: Option<String>,
        options_json: Option<String>,
        options: Vec<String>,
    }

    fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut args = Args {
            spins: 1,
            ..Args::default()
        };
        while let Some(arg) = raw.next() {
            let mut value = |flag: &str| raw.next().ok_or_else(|| format!("{flag} needs a value"));
            match arg.as_str() {
                "--seed" => {
                    let v = value("--seed")?;
                    args.seed = Some(v.parse().map_err(|_| format!("bad seed: {v}"))?);
                }
                "--spins" => {
                    let v = value("--spins")?;
                    args.spins = v.parse().map_err(|_| format!("bad spin count: {v}"))?;
                }
                "--svg" => args.svg = Some(value("--svg")?),
                "--options-json" => args.options_json = Some(value("--options-json")?),
                "-h" | "--help" => return Err(String::new()),
                _ if arg.starts_with("--") => return Err(format!("unknown flag: {arg}")),
                _ => args.options.push(arg),
            }
        }
        Ok(args)
    }

    fn load_options(args: &Args) -> Result<Vec<WheelOption>, String> {
        let Some(path) = &args.options_json else {
            return Ok(args.options.iter().map(|s| WheelOption::new(s.as_str())).collect());
        };
        let json = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
        WheelOption::list_from_json(&json).map_err(|e| format!("invalid options in {path}: {e}"))
    }

    fn describe(option: &WheelOption) -> String {
        let mut line = option.text.clone();
        if let Some(penalty) = &option.penalty {
            line.push_str(&format!("  (penalty: {penalty})"));
        }
        if let Some(bonus) = &option.bonus {
            line.push_str(&format!("  (bonus: {bonus})"));
        }
        line
    }

    pub fn run() -> ExitCode {
        env_logger::init();

        let args = match parse_args(std::env::args().skip(1)) {
            Ok(args) => args,
            Err(msg) => {
                if !msg.is_empty() {
                    eprintln!("error: {msg}");
                }
                eprintln!("{USAGE}");
                return ExitCode::from(2);
            }
        };

        let options = match load_options(&args) {
            Ok(options) => options,
            Err(msg) => {
                eprintln!("error: {msg}");
                return ExitCode::from(2);
            }
        };

        let settings = WheelSettings::load();
        if !settings.can_spin(options.len()) {
            eprintln!("error: need at least {} options to spin", settings.min_options);
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }

        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Spinning {} options with seed {seed}", options.len());

        let landed: Rc<RefCell<Vec<(usize, WheelOption)>>> = Rc::default();
        let sink = landed.clone();
        let mut engine = SpinEngine::new(options, seed)
            .with_settings(settings)
            .with_hooks(LogHooks::new("cli"))
            .on_result(move |index, option| sink.borrow_mut().push((index, option.clone())));

        let mut history = SpinHistory::new();
        let mut clock = FrameClock::new();
        let mut now = 0.0;
        clock.step(now);

        for n in 1..=args.spins {
            if !engine.spin() {
                log::warn!("Spin {n} was refused");
                break;
            }
            // Run frames until the wheel stops and any celebration is over
            while engine.is_spinning() || engine.is_celebrating() {
                now += FRAME_MS;
                engine.advance(clock.step(now));
            }
            for (index, option) in landed.borrow_mut().drain(..) {
                println!("Spin {n}: {}", describe(&option));
                history.record(SpinRecord {
                    option,
                    index,
                    rotation_degrees: engine.cumulative_rotation(),
                    timestamp: now,
                });
            }
        }

        if history.len() > 1 {
            println!("\nTally (last {} spins):", history.len().min(HISTORY_LEN));
            for (text, count) in history.tally() {
                println!("  {count:>3}  {text}");
            }
        }

        if let Some(path) = &args.svg {
            if let Err(e) = std::fs::write(path, engine.render_svg()) {
                eprintln!("error: cannot write {path}: {e}");
                return ExitCode::FAILURE;
            }
            log::info!("Wrote {path}");
        }

        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_start` in the library, this is just to satisfy the compiler
}
