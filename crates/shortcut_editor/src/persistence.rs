// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::raw::{self, SnapshotError};
use crate::{ContentState, Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode content: {0}")]
    Encode(#[source] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Write `content` as a raw JSON snapshot under `key`, replacing any
/// previous value.
pub fn save_content<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    content: &ContentState,
) -> Result<(), PersistError> {
    let json = raw::to_json(content).map_err(PersistError::Encode)?;
    storage.set_item(key, &json)?;
    log::debug!("saved {} blocks under {key:?}", content.blocks().len());
    Ok(())
}

/// Read the snapshot stored under `key`.
///
/// Never fails: an absent key, an unreadable storage and a corrupted
/// snapshot all yield `None`, so the caller can start from an empty
/// document.
pub fn load_content<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
) -> Option<ContentState> {
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read {key:?} from storage: {e}");
            return None;
        }
    };
    match raw::from_json(&json) {
        Ok(content) => Some(content),
        Err(e) => {
            log::error!("discarding corrupted snapshot under {key:?}: {e}");
            None
        }
    }
}
