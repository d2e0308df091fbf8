use crate::probe::StreamRecord;
use std::collections::BTreeSet;

/// How the command builder treats each input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StreamPolicy {
    /// Map every stream and copy it untouched.
    #[default]
    CopyAll,
    /// Map only the listed input indices, copying them.
    FilterByIndex(BTreeSet<u32>),
    /// Map every stream; the listed indices are encoded with `codec`.
    Remap {
        indices: BTreeSet<u32>,
        codec: String,
    },
}

/// What happens to a single mapped stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Copy,
    Encode(String),
}

/// One `-map` entry in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedStream {
    pub input_index: u32,
    pub output_index: usize,
    pub disposition: Disposition,
}

impl StreamPolicy {
    /// Resolves the policy against the probed streams, in input index order.
    pub fn plan(&self, streams: &[StreamRecord]) -> Vec<MappedStream> {
        let mut indices: Vec<u32> = streams.iter().map(|s| s.index).collect();
        indices.sort_unstable();
        indices.dedup();

        indices
            .into_iter()
            .filter(|index| match self {
                Self::FilterByIndex(keep) => keep.contains(index),
                _ => true,
            })
            .enumerate()
            .map(|(output_index, input_index)| {
                let disposition = match self {
                    Self::Remap { indices, codec } if indices.contains(&input_index) => {
                        Disposition::Encode(codec.clone())
                    }
                    _ => Disposition::Copy,
                };
                MappedStream {
                    input_index,
                    output_index,
                    disposition,
                }
            })
            .collect()
    }
}
