use log::info;
use revcrc::{Sample, SearchRange, Solver, presets};

fn main() -> Result<(), revcrc::Error> {
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    // Frames captured from a device that checksums with CRC-16/GENIBUS, but
    // pretend we only know the polynomial.
    let genibus = presets::CRC_16_GENIBUS.params;
    let frames: [&[u8]; 3] = [b"\x01\x03\x00\x10", b"\x01\x06\x00\x10\x00\x2A", b"\x01\x10"];
    let samples: Vec<Sample<u16>> = frames
        .into_iter()
        .map(|frame| Sample::new(frame, genibus.checksum(frame)))
        .collect();

    let keys = Solver::new()
        .with_polynomial(genibus.polynomial)
        .with_xor_outs(SearchRange::new(0xFF00, 0xFFFF)?)
        .backward(&samples)?;

    for key in keys {
        info!(
            "poly: {:#06x} seed: {:#06x} xor: {:#06x}",
            key.polynomial, key.seed, key.xor_out
        );
    }

    Ok(())
}
