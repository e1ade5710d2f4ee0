//! Terminal map surface: one line per marker change.

use std::io::{self, Write};

use geotrack_presence::{LatLng, MapFactory, MapOptions, MapSurface};

/// Writes to the process's stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

pub struct TerminalMapFactory<W> {
    out: W,
}

impl TerminalMapFactory<Stdout> {
    pub fn stdout() -> Self {
        Self { out: Stdout }
    }
}

impl<W: Write + Clone> TerminalMapFactory<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

pub struct TerminalMap<W> {
    out: W,
    next_id: u32,
}

pub struct TerminalMarker {
    id: u32,
    title: String,
}

impl<W: Write + Clone> MapFactory for TerminalMapFactory<W> {
    type Surface = TerminalMap<W>;

    fn create(&mut self, options: MapOptions) -> TerminalMap<W> {
        let mut out = self.out.clone();
        let _ = writeln!(out, "map centered at {} (zoom {})", options.center, options.zoom);
        TerminalMap { out, next_id: 0 }
    }
}

impl<W: Write> MapSurface for TerminalMap<W> {
    type Marker = TerminalMarker;

    fn place_marker(&mut self, at: LatLng, title: &str) -> TerminalMarker {
        self.next_id += 1;
        let _ = writeln!(self.out, "[+] #{} {title} ({at})", self.next_id);
        TerminalMarker {
            id: self.next_id,
            title: title.to_string(),
        }
    }

    fn move_marker(&mut self, marker: &mut TerminalMarker, at: LatLng) {
        let _ = writeln!(self.out, "[~] #{} {} ({at})", marker.id, marker.title);
    }

    fn remove_marker(&mut self, marker: TerminalMarker) {
        let _ = writeln!(self.out, "[-] #{} {}", marker.id, marker.title);
    }
}
