use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Path that selects stdin / stdout instead of a file
pub const STDIO_PATH: &str = "-";

pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Read the whole source into memory
pub fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if is_stdio(path) {
        io::stdin().lock().read_to_end(&mut buf)?;
    } else {
        File::open(path)?.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Write all bytes or fail
pub fn write_output(path: &Path, buf: &[u8]) -> io::Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(buf)?;
        stdout.flush()
    } else {
        let mut file = File::create(path)?;
        file.write_all(buf)?;
        file.sync_all()
    }
}
