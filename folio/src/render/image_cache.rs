// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_document::ImageSource;

use crate::lru_cache::{LookupKey, LruCache};
use crate::render::{DecodedImage, ImageDecoder};

impl LookupKey<ImageSource> for &ImageSource {
    fn matches(&self, key: &ImageSource) -> bool {
        *self == key
    }

    fn to_key(self) -> ImageSource {
        self.clone()
    }
}

/// Decoded pixels keyed by image source.
///
/// Failed decodes are cached too, so a broken source is only tried once
/// while it stays in the cache.
pub(crate) struct ImageCache {
    entries: LruCache<ImageSource, Option<DecodedImage>>,
}

impl ImageCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub(crate) fn get(
        &mut self,
        source: &ImageSource,
        decoder: &mut impl ImageDecoder,
    ) -> Option<&DecodedImage> {
        self.entries
            .get_or_insert_with(source, || {
                let decoded = decoder.decode(source);
                if decoded.is_none() {
                    log::debug!("could not decode image {}", source.as_str());
                }
                decoded
            })
            .as_ref()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
