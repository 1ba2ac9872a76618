use anyhow::{bail, Context, Result};
use tinyboy::RunOptions;
use tinyboy_cpu::{ClockSpeed, CpuConfig};

const USAGE: &str = "usage: tinyboy [--cgb] [--no-throttle] [--trace] [--steps N] <rom>";

struct Args {
    rom_path: String,
    options: RunOptions,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut double_speed = false;
    let mut throttle = true;
    let mut trace = false;
    let mut max_steps = None;
    let mut rom_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cgb" => double_speed = true,
            "--no-throttle" => throttle = false,
            "--trace" => trace = true,
            "--steps" => {
                let value = args.next().context("--steps needs a value")?;
                let steps = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid step count '{value}'"))?;
                max_steps = Some(steps);
            }
            other if other.starts_with("--") => bail!("unknown option '{other}'\n{USAGE}"),
            _ if rom_path.is_some() => bail!("more than one ROM path given\n{USAGE}"),
            path => rom_path = Some(path.to_string()),
        }
    }

    let Some(rom_path) = rom_path else {
        bail!("no ROM path provided\n{USAGE}");
    };

    let config = CpuConfig::builder()
        .clock_speed(ClockSpeed::from_double_speed(double_speed))
        .throttle(throttle)
        .trace(trace)
        .build();
    let options = RunOptions {
        config,
        max_steps,
    };

    Ok(Args { rom_path, options })
}

fn try_main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    log::info!("Playing ROM path: '{}'", args.rom_path);
    let rom = std::fs::read(&args.rom_path)
        .with_context(|| format!("failed to read ROM file '{}'", args.rom_path))?;

    tinyboy::run(args.options, &rom)?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = try_main() {
        log::error!("{err:#}");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
