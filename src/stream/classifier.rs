use crate::probe::{StreamRecord, StreamType};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Streams of the interest set whose codec is on the allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Matching stream indices, strictly increasing.
    pub matched_indices: Vec<u32>,
}

impl Classification {
    pub fn matched(&self) -> bool {
        !self.matched_indices.is_empty()
    }
}

/// Decides which streams need processing.
///
/// Holds only read-only configuration; each call to [`classify`](Self::classify)
/// starts from an empty result, so nothing carries over between files.
#[derive(Debug, Clone)]
pub struct StreamClassifier {
    interest_types: HashSet<StreamType>,
    codec_allowlist: BTreeSet<String>,
}

impl StreamClassifier {
    pub fn new(interest_types: HashSet<StreamType>, codec_allowlist: BTreeSet<String>) -> Self {
        Self {
            interest_types,
            codec_allowlist,
        }
    }

    /// Classifier that inspects audio streams only.
    pub fn audio(codec_allowlist: BTreeSet<String>) -> Self {
        Self::new(HashSet::from([StreamType::Audio]), codec_allowlist)
    }

    pub fn classify(&self, streams: &[StreamRecord]) -> Classification {
        classify(streams, &self.interest_types, &self.codec_allowlist)
    }
}

/// Walks `streams` in index order and records every interest-type stream whose
/// lower-cased codec is in `codec_allowlist`.
///
/// Repeated indices are looked at once, first occurrence wins.
pub fn classify(
    streams: &[StreamRecord],
    interest_types: &HashSet<StreamType>,
    codec_allowlist: &BTreeSet<String>,
) -> Classification {
    let mut ordered: Vec<&StreamRecord> = streams.iter().collect();
    ordered.sort_by_key(|s| s.index);
    ordered.dedup_by_key(|s| s.index);

    let mut matched_indices = Vec::new();
    for stream in ordered {
        if !interest_types.contains(&stream.stream_type) {
            continue;
        }

        let codec = stream.codec_key();
        debug!(
            "Stream {} ({}) codec name = {:?}",
            stream.index, stream.stream_type, codec
        );

        if !codec.is_empty() && codec_allowlist.contains(&codec) {
            debug!("Stream {} codec {} matched", stream.index, codec);
            matched_indices.push(stream.index);
        }
    }

    Classification { matched_indices }
}
