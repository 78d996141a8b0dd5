use std::env;
use std::io::{self, Write};
use std::process;

use quadmixrng::QuadMixRng;

const CHUNK_LEN: usize = 65536;

// Stream mode: dump generator output to stdout, either forever or capped by
// a byte count given as the first argument.
fn main() -> io::Result<()> {
    let mut remaining = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                eprintln!("usage: quadmixrng [BYTES]");
                process::exit(2);
            }
        },
        None => None,
    };

    let mut rng = QuadMixRng::new();
    let mut buf = vec![0u8; CHUNK_LEN];
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let want = match remaining {
            Some(0) => break,
            Some(n) => CHUNK_LEN.min(n as usize),
            None => CHUNK_LEN,
        };
        rng.fill(&mut buf[..want]).map_err(io::Error::other)?;
        out.write_all(&buf[..want])?;
        if let Some(n) = remaining.as_mut() {
            *n -= want as u64;
        }
    }
    out.flush()
}
