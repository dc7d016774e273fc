//! Direct format selection from yt-dlp `formats[]`.

use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// One entry of yt-dlp's `formats` list, reduced to the fields the selector ranks on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatDescriptor {
    pub url: Option<String>,
    pub vcodec: Option<String>,
    pub height: Option<u64>,
    /// Total bitrate in KBit/s (yt-dlp `tbr`)
    pub bitrate: Option<f64>,
    /// Exact size in bytes, or yt-dlp's approximation when the exact one is unknown
    pub filesize: Option<f64>,
}

fn string_field(format: &Value, key: &str) -> Option<String> {
    format.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(format: &Value, key: &str) -> Option<f64> {
    format.get(key).and_then(Value::as_f64)
}

impl FormatDescriptor {
    /// Builds a descriptor from a raw format entry.
    ///
    /// Returns `None` for entries that are not JSON objects. Fields with an
    /// unexpected type are treated as absent.
    pub fn from_json(format: &Value) -> Option<Self> {
        if !format.is_object() {
            return None;
        }

        let height = format
            .get("height")
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().filter(|h| *h >= 0.0).map(|h| h as u64)));

        Some(Self {
            url: string_field(format, "url"),
            vcodec: string_field(format, "vcodec"),
            height,
            bitrate: number_field(format, "tbr"),
            filesize: number_field(format, "filesize").or_else(|| number_field(format, "filesize_approx")),
        })
    }

    /// A direct format has a resolvable URL and carries an actual video stream.
    pub fn is_direct_video(&self) -> bool {
        let has_url = self.url.as_deref().is_some_and(|url| !url.is_empty());
        let has_video = self
            .vcodec
            .as_deref()
            .is_some_and(|vcodec| !vcodec.is_empty() && vcodec != "none");
        has_url && has_video
    }

    /// Ranking key: height, then bitrate, then filesize. Missing values count as zero.
    fn rank_key(&self) -> (u64, f64, f64) {
        (
            self.height.unwrap_or(0),
            self.bitrate.unwrap_or(0.0),
            self.filesize.unwrap_or(0.0),
        )
    }

    fn cmp_rank(&self, other: &Self) -> Ordering {
        let (height_a, bitrate_a, size_a) = self.rank_key();
        let (height_b, bitrate_b, size_b) = other.rank_key();
        height_a
            .cmp(&height_b)
            .then_with(|| bitrate_a.total_cmp(&bitrate_b))
            .then_with(|| size_a.total_cmp(&size_b))
    }
}

/// Picks the best direct video format from yt-dlp's `formats[]`.
///
/// Keeps entries that have a `url` and a `vcodec` other than `"none"`
/// (audio-only streams are dropped), then prefers the highest height, then
/// bitrate, then filesize. Malformed entries are skipped. Among equally ranked
/// formats the first one in input order wins.
///
/// Returns `None` when no format qualifies.
pub fn select_best_direct_format(formats: &[Value]) -> Option<FormatDescriptor> {
    let mut candidates: Vec<FormatDescriptor> = formats
        .iter()
        .filter_map(FormatDescriptor::from_json)
        .filter(FormatDescriptor::is_direct_video)
        .collect();

    // sort_by is stable, so ties keep input order
    candidates.sort_by(|a, b| b.cmp_rank(a));
    candidates.into_iter().next()
}
