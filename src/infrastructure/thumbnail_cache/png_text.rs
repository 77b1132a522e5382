//! PNG text chunks
//!
//! Cached thumbnails record the URI and modification time of their source
//! in `tEXt` chunks. This module walks PNG chunks to read them back and
//! splices new ones into encoded images.

use std::collections::HashMap;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Source URI of a cached thumbnail
pub const THUMB_URI: &str = "Thumb::URI";

/// Source modification time of a cached thumbnail, in epoch seconds
pub const THUMB_MTIME: &str = "Thumb::MTime";

const TEXT_CHUNK_TYPE: &[u8; 4] = b"tEXt";
const IHDR_CHUNK_TYPE: &[u8; 4] = b"IHDR";

/// Length + type + CRC
const CHUNK_OVERHEAD: usize = 12;

pub struct PngChunkIterator<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PngChunkIterator<'a> {
    pub fn new(data: &'a [u8]) -> Option<Self> {
        if data.len() < 8 || data[..8] != PNG_SIGNATURE {
            return None;
        }

        Some(Self { data, pos: 8 })
    }

    /// Returns the offset of the next chunk
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for PngChunkIterator<'a> {
    type Item = ([u8; 4], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos + CHUNK_OVERHEAD > self.data.len() {
            return None;
        }

        let length = u32::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]) as usize;

        let chunk_type: [u8; 4] = [
            self.data[self.pos + 4],
            self.data[self.pos + 5],
            self.data[self.pos + 6],
            self.data[self.pos + 7],
        ];

        let total_size = CHUNK_OVERHEAD.checked_add(length)?;
        if self.pos + total_size > self.data.len() {
            return None;
        }

        let payload = &self.data[self.pos + 8..self.pos + 8 + length];

        self.pos += total_size;

        Some((chunk_type, payload))
    }
}

/// Reads all `tEXt` chunks of an encoded PNG as keyword/text pairs
///
/// Text is Latin-1 encoded. Malformed chunks are skipped. Returns an empty
/// map for data that is not a PNG.
pub fn read_text_chunks(data: &[u8]) -> HashMap<String, String> {
    let Some(chunks) = PngChunkIterator::new(data) else {
        return HashMap::new();
    };

    chunks
        .filter(|(chunk_type, _)| chunk_type == TEXT_CHUNK_TYPE)
        .filter_map(|(_, payload)| {
            let separator = payload.iter().position(|&b| b == 0)?;
            let keyword = latin1(&payload[..separator]);
            let text = latin1(&payload[separator + 1..]);
            Some((keyword, text))
        })
        .collect()
}

/// Inserts `tEXt` chunks right after the `IHDR` chunk of an encoded PNG
///
/// Returns `None` if `png` has no leading `IHDR` chunk.
pub fn insert_text_chunks(png: &[u8], entries: &[(&str, &str)]) -> Option<Vec<u8>> {
    let mut chunks = PngChunkIterator::new(png)?;
    let (chunk_type, _) = chunks.next()?;
    if &chunk_type != IHDR_CHUNK_TYPE {
        return None;
    }
    let split = chunks.position();

    let mut output = Vec::with_capacity(png.len() + entries.len() * 64);
    output.extend_from_slice(&png[..split]);
    for (keyword, text) in entries {
        write_text_chunk(&mut output, keyword, text);
    }
    output.extend_from_slice(&png[split..]);

    Some(output)
}

fn write_text_chunk(output: &mut Vec<u8>, keyword: &str, text: &str) {
    let mut payload = Vec::with_capacity(keyword.len() + 1 + text.len());
    payload.extend_from_slice(keyword.as_bytes());
    payload.push(0);
    payload.extend_from_slice(text.as_bytes());

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(TEXT_CHUNK_TYPE);
    hasher.update(&payload);
    let crc = hasher.finalize();

    output.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    output.extend_from_slice(TEXT_CHUNK_TYPE);
    output.extend_from_slice(&payload);
    output.extend_from_slice(&crc.to_be_bytes());
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
