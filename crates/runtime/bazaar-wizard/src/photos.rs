//! Photo gallery for photo-bearing detail forms
//!
//! Photos carry a stable [`PhotoId`]; the cover is tracked by id, so
//! reordering or removing other photos never moves the cover to a
//! different image.

use crate::{Result, WizardError};
use serde::{Deserialize, Serialize};

/// Upload cap per form
pub const MAX_PHOTOS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoGallery {
    photos: Vec<Photo>,
    cover: Option<PhotoId>,
    next_id: u64,
}

/// Ordered photo references with the cover position, as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSet {
    pub urls: Vec<String>,
    pub cover_index: Option<usize>,
}

impl PhotoGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn remaining(&self) -> usize {
        MAX_PHOTOS - self.photos.len()
    }

    /// Append photos up to [`MAX_PHOTOS`]; the excess is dropped. Returns
    /// how many were added. The first photo ever added becomes the cover.
    pub fn upload<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.photos.len();
        for url in urls.into_iter().take(self.remaining()) {
            let id = PhotoId(self.next_id);
            self.next_id += 1;
            self.photos.push(Photo { id, url: url.into() });
        }
        if self.cover.is_none() {
            self.cover = self.photos.first().map(|p| p.id);
        }
        self.photos.len() - before
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.photos.len() {
            Ok(())
        } else {
            Err(WizardError::PhotoIndex {
                index,
                len: self.photos.len(),
            })
        }
    }

    pub fn cover_index(&self) -> Option<usize> {
        let cover = self.cover?;
        self.photos.iter().position(|p| p.id == cover)
    }

    pub fn cover(&self) -> Option<&Photo> {
        self.cover_index().map(|i| &self.photos[i])
    }

    pub fn set_cover(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.cover = Some(self.photos[index].id);
        Ok(())
    }

    /// Remove a photo. Removing the cover hands it to the new first photo.
    pub fn remove(&mut self, index: usize) -> Result<Photo> {
        self.check_index(index)?;
        let removed = self.photos.remove(index);
        if self.cover == Some(removed.id) {
            self.cover = self.photos.first().map(|p| p.id);
        }
        Ok(removed)
    }

    /// Drag-and-drop: move the photo at `from` so it ends up at `to`.
    ///
    /// The cover stays on the same image. When the moved image is the
    /// cover, the cover index therefore becomes `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let photo = self.photos.remove(from);
        self.photos.insert(to, photo);
        Ok(())
    }

    pub fn snapshot(&self) -> PhotoSet {
        PhotoSet {
            urls: self.photos.iter().map(|p| p.url.clone()).collect(),
            cover_index: self.cover_index(),
        }
    }
}
