use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::assets::codec::{ImageCodec, PayloadCodec};
use crate::config::project::StoreOpts;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::store::naming::{self, SequenceIdentity};

/// One persisted frame of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Position in the sequence.
    pub index: FrameIndex,
    /// File holding the payload.
    pub path: PathBuf,
}

/// Owner of an on-disk frame sequence.
///
/// Single writer: nothing coordinates two stores (or two processes) pointed at the same
/// identity. Unrelated files in the directory are left alone.
#[derive(Debug)]
pub struct FrameStore<C = ImageCodec> {
    identity: SequenceIdentity,
    next_index: FrameIndex,
    codec: C,
}

/// A pending rename from `from` to `to` inside one batch.
#[derive(Clone, Copy, Debug)]
struct Move {
    from: FrameIndex,
    to: FrameIndex,
}

impl FrameStore<ImageCodec> {
    /// Open the sequence rooted at `base` (`dir/stem`) storing images.
    pub fn open(base: impl AsRef<Path>, opts: &StoreOpts) -> FramesmithResult<Self> {
        Self::with_codec(base, opts, ImageCodec)
    }

    /// Open the sequence found in `dir`, inferring stem and extension from its frames.
    ///
    /// When several `<stem><ext>` groups share the folder, the one with the most frames wins;
    /// ties go to the group holding the lowest index. Always recovers the cursor.
    pub fn discover(dir: impl AsRef<Path>) -> FramesmithResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FramesmithError::configuration(format!(
                "frames folder '{}' doesn't exist",
                dir.display()
            )));
        }
        // remainder -> (frame count, lowest index)
        let mut groups: BTreeMap<String, (usize, FrameIndex)> = BTreeMap::new();
        for name in read_file_names(dir)? {
            let Some((idx, rest)) = naming::split_any(&name) else {
                continue;
            };
            if rest.contains(naming::INDEX_DELIMITER) {
                continue;
            }
            let group = groups.entry(rest.to_string()).or_insert((0, idx));
            group.0 += 1;
            group.1 = group.1.min(idx);
        }
        let best = groups
            .into_iter()
            .max_by(|(_, (n_a, lo_a)), (_, (n_b, lo_b))| n_a.cmp(n_b).then(lo_b.cmp(lo_a)));
        let Some((rest, _)) = best else {
            return Err(FramesmithError::configuration(format!(
                "no indexed frames found in '{}'",
                dir.display()
            )));
        };
        let rest = Path::new(&rest);
        let stem = rest.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let ext = rest
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let opts = StoreOpts {
            extension: ext,
            recover_existing: true,
        };
        Self::with_codec(dir.join(stem), &opts, ImageCodec)
    }
}

impl<C: PayloadCodec> FrameStore<C> {
    /// Open the sequence rooted at `base` with a custom payload codec.
    ///
    /// The parent directory of `base` must exist. With `opts.recover_existing`, the cursor
    /// continues after the highest index already on disk; otherwise it starts at 0 and
    /// appends overwrite existing frames.
    pub fn with_codec(
        base: impl AsRef<Path>,
        opts: &StoreOpts,
        codec: C,
    ) -> FramesmithResult<Self> {
        let identity = SequenceIdentity::from_base_path(base.as_ref(), &opts.extension)?;
        if !identity.dir().is_dir() {
            return Err(FramesmithError::configuration(format!(
                "frames folder '{}' doesn't exist",
                identity.dir().display()
            )));
        }
        let mut store = Self {
            identity,
            next_index: FrameIndex(0),
            codec,
        };
        if opts.recover_existing {
            store.recover()?;
        }
        Ok(store)
    }

    /// Naming scheme of this sequence.
    pub fn identity(&self) -> &SequenceIdentity {
        &self.identity
    }

    /// Index the next appended frame will receive.
    pub fn next_index(&self) -> FrameIndex {
        self.next_index
    }

    /// Payload codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Re-derive the cursor from disk: highest existing index + 1, or 0 without frames.
    pub fn recover(&mut self) -> FramesmithResult<FrameIndex> {
        let frames = self.list_ordered()?;
        self.next_index = frames
            .last()
            .map(|f| f.index.next())
            .unwrap_or(FrameIndex(0));
        tracing::debug!(
            dir = %self.identity.dir().display(),
            stem = self.identity.stem(),
            frames = frames.len(),
            next = self.next_index.0,
            "recovered sequence"
        );
        Ok(self.next_index)
    }

    /// Frames of this sequence in ascending numeric index order.
    ///
    /// Files that do not decode under this identity, temporaries included, are skipped.
    pub fn list_ordered(&self) -> FramesmithResult<Vec<Frame>> {
        let mut frames = Vec::new();
        for name in read_file_names(self.identity.dir())? {
            match self.identity.decode(&name) {
                Some(index) => frames.push(Frame {
                    index,
                    path: self.identity.dir().join(&name),
                }),
                None => tracing::trace!(file = %name, "skipping non-frame entry"),
            }
        }
        frames.sort_by_key(|f| f.index);
        Ok(frames)
    }

    /// Frames left under a temporary name by an interrupted batch, ordered by embedded index.
    pub fn stranded_temporaries(&self) -> FramesmithResult<Vec<Frame>> {
        let mut frames: Vec<Frame> = read_file_names(self.identity.dir())?
            .into_iter()
            .filter_map(|name| {
                let index = self.identity.decode_temp(&name)?;
                Some(Frame {
                    index,
                    path: self.identity.dir().join(name),
                })
            })
            .collect();
        frames.sort_by_key(|f| f.index);
        Ok(frames)
    }

    /// Persist `payload` at the cursor, then advance the cursor.
    ///
    /// A failed write leaves the cursor where it was.
    pub fn append(&mut self, payload: &C::Payload) -> FramesmithResult<Frame> {
        let index = self.next_index;
        let path = self.identity.frame_path(index);
        self.codec.save(payload, &path)?;
        self.next_index = index.next();
        tracing::debug!(index = index.0, path = %path.display(), "appended frame");
        Ok(Frame { index, path })
    }

    /// Read the payload of `frame`.
    pub fn load(&self, frame: &Frame) -> FramesmithResult<C::Payload> {
        self.codec.load(&frame.path)
    }

    /// Renumber the sequence to `0..N-1`, keeping relative order, and set the cursor to `N`.
    ///
    /// Frames stranded under temporary names are folded back in first: each returns to its
    /// embedded index when that slot is free, otherwise it is placed after the last frame.
    /// Returns the number of renames performed; a second call in a row returns 0.
    #[tracing::instrument(skip(self), fields(stem = self.identity.stem()))]
    pub fn reindex(&mut self) -> FramesmithResult<usize> {
        let mut renamed = self.adopt_stranded()?;

        let frames = self.list_ordered()?;
        let moves: Vec<Move> = frames
            .iter()
            .enumerate()
            .map(|(pos, f)| Move {
                from: f.index,
                to: FrameIndex(pos as u64),
            })
            .filter(|m| m.from != m.to)
            .collect();
        self.rename_two_phase(&moves)?;
        renamed += moves.len();

        self.next_index = FrameIndex(frames.len() as u64);
        tracing::debug!(renamed, next = self.next_index.0, "reindexed sequence");
        Ok(renamed)
    }

    /// Reverse the order of frames with index in `[start, end)`; frames outside are untouched.
    ///
    /// `end` may not exceed the cursor. Returns the number of frames renamed.
    #[tracing::instrument(skip(self), fields(stem = self.identity.stem()))]
    pub fn reverse(&mut self, start: FrameIndex, end: FrameIndex) -> FramesmithResult<usize> {
        let range = FrameRange::new(start, end)?;
        if end > self.next_index {
            return Err(FramesmithError::validation(format!(
                "reverse end {end} is past the next index {}",
                self.next_index
            )));
        }
        if range.len_frames() < 2 {
            return Ok(0);
        }
        let moves: Vec<Move> = self
            .list_ordered()?
            .into_iter()
            .filter(|f| range.contains(f.index))
            .map(|f| Move {
                from: f.index,
                to: range.mirror(f.index),
            })
            .filter(|m| m.from != m.to)
            .collect();
        self.rename_two_phase(&moves)?;
        Ok(moves.len())
    }

    /// Reverse the whole sequence: `reverse(0, next_index)`.
    pub fn reverse_all(&mut self) -> FramesmithResult<usize> {
        self.reverse(FrameIndex(0), self.next_index)
    }

    /// Copy every current frame, in order or reversed, to new indices starting at the cursor.
    ///
    /// Reversed duplication turns `0 1 2` into `0 1 2 2 1 0`, a sequence that loops back and
    /// forth. Originals are not touched. Returns the new frames.
    #[tracing::instrument(skip(self), fields(stem = self.identity.stem()))]
    pub fn duplicate_all(&mut self, reverse_order: bool) -> FramesmithResult<Vec<Frame>> {
        let mut sources = self.list_ordered()?;
        if let Some(last) = sources.last()
            && last.index >= self.next_index
        {
            return Err(FramesmithError::validation(format!(
                "frame {} exists at or past the next index {}; recover or reindex first",
                last.index, self.next_index
            )));
        }
        if reverse_order {
            sources.reverse();
        }

        let mut created = Vec::with_capacity(sources.len());
        for src in sources {
            let index = self.next_index;
            let path = self.identity.frame_path(index);
            self.codec.copy(&src.path, &path)?;
            self.next_index = index.next();
            tracing::debug!(from = src.index.0, to = index.0, "duplicated frame");
            created.push(Frame { index, path });
        }
        Ok(created)
    }

    // Rename every `from` to its temporary name, then every temporary name to `to`. Targets in
    // a batch are distinct and any occupied target is itself a source of the batch.
    fn rename_two_phase(&self, moves: &[Move]) -> FramesmithResult<()> {
        if moves.is_empty() {
            return Ok(());
        }
        for m in moves {
            let tmp = self.identity.temp_path(m.from);
            if path_exists(&tmp)? {
                return Err(FramesmithError::validation(format!(
                    "temporary file '{}' already exists; run reindex to recover it",
                    tmp.display()
                )));
            }
        }

        for m in moves {
            rename(&self.identity.frame_path(m.from), &self.identity.temp_path(m.from))?;
        }
        for m in moves {
            let to = self.identity.frame_path(m.to);
            rename(&self.identity.temp_path(m.from), &to)?;
            tracing::debug!(from = m.from.0, to = m.to.0, "renamed frame");
        }
        Ok(())
    }

    // Bring stranded temporaries back under regular names so `list_ordered` sees them again.
    fn adopt_stranded(&self) -> FramesmithResult<usize> {
        let stranded = self.stranded_temporaries()?;
        if stranded.is_empty() {
            return Ok(0);
        }
        let mut taken: BTreeSet<FrameIndex> =
            self.list_ordered()?.into_iter().map(|f| f.index).collect();

        let mut in_place = 0usize;
        let mut deferred = Vec::new();
        for tmp in stranded {
            if taken.insert(tmp.index) {
                rename(&tmp.path, &self.identity.frame_path(tmp.index))?;
                in_place += 1;
            } else {
                deferred.push(tmp);
            }
        }
        let mut next = taken.last().map(|i| i.next()).unwrap_or(FrameIndex(0));
        for tmp in &deferred {
            rename(&tmp.path, &self.identity.frame_path(next))?;
            next = next.next();
        }
        tracing::warn!(in_place, appended = deferred.len(), "adopted stranded temporaries");
        Ok(in_place + deferred.len())
    }
}

fn read_file_names(dir: &Path) -> FramesmithResult<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| FramesmithError::io("read directory", dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FramesmithError::io("read directory", dir, e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            continue;
        }
        // Frame names are always UTF-8; anything else cannot belong to a sequence.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

fn rename(from: &Path, to: &Path) -> FramesmithResult<()> {
    std::fs::rename(from, to).map_err(|e| FramesmithError::io("rename", from, e))
}

fn path_exists(path: &Path) -> FramesmithResult<bool> {
    path.try_exists()
        .map_err(|e| FramesmithError::io("inspect", path, e))
}
