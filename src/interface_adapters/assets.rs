// Loads collision masks and sprite sizes from Netpbm bitmap files.
//
// Both plain (`P1`) and raw (`P4`) PBM are accepted. A set bit (1, black)
// is a solid pixel, matching an opaque pixel in the drawn image.

use crate::domain::{Mask, Sprite, Track};
use crate::use_cases::RaceAssets;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BORDER_FILE: &str = "track-border.pbm";
pub const FINISH_FILE: &str = "finish.pbm";
pub const PLAYER_CAR_FILE: &str = "red-car.pbm";
pub const COMPUTER_CAR_FILE: &str = "green-car.pbm";

#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: std::io::Error },
    Format { path: PathBuf, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            AssetError::Format { path, reason } => {
                write!(f, "invalid bitmap {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            AssetError::Format { .. } => None,
        }
    }
}

/// Loads the track masks and both car sprites from `dir`.
pub fn load_race_assets(dir: &Path) -> Result<RaceAssets, AssetError> {
    let border = load_mask(&dir.join(BORDER_FILE))?;
    let finish = load_mask(&dir.join(FINISH_FILE))?;
    let player = load_mask(&dir.join(PLAYER_CAR_FILE))?;
    let computer = load_mask(&dir.join(COMPUTER_CAR_FILE))?;

    tracing::debug!(
        border_w = border.width(),
        border_h = border.height(),
        border_px = border.count(),
        finish_px = finish.count(),
        "track masks loaded"
    );

    Ok(RaceAssets {
        track: Arc::new(Track::new(border, finish)),
        player_sprite: Arc::new(Sprite::new("red-car", player)),
        computer_sprite: Arc::new(Sprite::new("green-car", computer)),
    })
}

pub fn load_mask(path: &Path) -> Result<Mask, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pbm(&bytes).map_err(|reason| AssetError::Format {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parses a PBM image into a mask.
pub fn parse_pbm(bytes: &[u8]) -> Result<Mask, String> {
    let mut cursor = Cursor { bytes, pos: 0 };

    let magic = cursor.token().ok_or("missing magic number")?;
    let raw = match magic {
        b"P1" => false,
        b"P4" => true,
        other => {
            return Err(format!(
                "unsupported magic number {:?}",
                String::from_utf8_lossy(other)
            ));
        }
    };
    let width = cursor.number()?;
    let height = cursor.number()?;
    if width == 0 || height == 0 {
        return Err(format!("empty image {width}x{height}"));
    }
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or("raster is truncated")?;

    let bits = if raw {
        // Exactly one whitespace byte separates the header from the raster.
        cursor.pos += 1;
        let row_bytes = (width as usize).div_ceil(8);
        let raster_len = row_bytes
            .checked_mul(height as usize)
            .filter(|len| *len <= cursor.remaining())
            .ok_or("raster is truncated")?;
        let raster = &cursor.bytes[cursor.pos..cursor.pos + raster_len];

        let mut bits = Vec::with_capacity(pixels);
        for row in raster.chunks(row_bytes) {
            for x in 0..width as usize {
                bits.push(row[x / 8] & (0x80 >> (x % 8)) != 0);
            }
        }
        bits
    } else {
        // Every plain pixel takes at least one byte.
        if pixels > cursor.remaining() {
            return Err("raster is truncated".to_string());
        }
        let mut bits = Vec::with_capacity(pixels);
        while bits.len() < pixels {
            cursor.skip_space_and_comments();
            match cursor.bytes.get(cursor.pos) {
                Some(b'0') => bits.push(false),
                Some(b'1') => bits.push(true),
                Some(other) => return Err(format!("unexpected byte {other:#04x} in raster")),
                None => return Err("raster is truncated".to_string()),
            }
            cursor.pos += 1;
        }
        bits
    };

    Mask::from_bits(width, height, bits).ok_or_else(|| "raster size mismatch".to_string())
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn skip_space_and_comments(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte == b'#' {
                while self.bytes.get(self.pos).is_some_and(|b| *b != b'\n') {
                    self.pos += 1;
                }
            } else if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_space_and_comments();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        if self.pos > start {
            Some(&self.bytes[start..self.pos])
        } else {
            None
        }
    }

    fn number(&mut self) -> Result<u32, String> {
        let token = self.token().ok_or("header is truncated")?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| format!("bad header value {:?}", String::from_utf8_lossy(token)))
    }
}
