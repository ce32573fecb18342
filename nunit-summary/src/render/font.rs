// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::RenderError;
use ab_glyph::{Font, FontVec, PxScale, PxScaleFont};
use fontdb::{Database, Family, Query};
use std::fmt;
use tracing::debug;

/// Font families tried in order when looking up the summary font.
///
/// The first entry is the classic Windows UI face; the rest are common sans-serif faces with
/// similar metrics. The generic sans-serif family is tried after all of them.
pub const FONT_FAMILIES: &[&str] = &[
    "Microsoft Sans Serif",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Helvetica",
];

/// Size of the summary font, in device pixels rather than points so that layout is identical on
/// every platform.
pub const FONT_SIZE_PX: f32 = 14.0;

/// The face used to measure and draw summary text.
pub struct SummaryFont {
    family: String,
    font: FontVec,
}

impl SummaryFont {
    /// Looks up the first available face of [`FONT_FAMILIES`] among the system fonts.
    pub fn load_default() -> Result<Self, RenderError> {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("loaded {} system font faces", db.len());
        Self::from_database(&db)
    }

    /// Looks up the first available face of [`FONT_FAMILIES`] in `db`.
    pub fn from_database(db: &Database) -> Result<Self, RenderError> {
        let families: Vec<Family<'_>> = FONT_FAMILIES
            .iter()
            .map(|name| Family::Name(*name))
            .chain(std::iter::once(Family::SansSerif))
            .collect();
        let query = Query {
            families: &families,
            ..Query::default()
        };

        let Some(id) = db.query(&query) else {
            let mut searched: Vec<String> = FONT_FAMILIES.iter().map(|s| (*s).to_owned()).collect();
            searched.push(db.family_name(&Family::SansSerif).to_owned());
            return Err(RenderError::FontUnavailable { families: searched });
        };

        let family = db
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "sans-serif".to_owned());

        let font = db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
            })
            .ok_or_else(|| RenderError::FontLoad {
                family: family.clone(),
                err: None,
            })?
            .map_err(|err| RenderError::FontLoad {
                family: family.clone(),
                err: Some(err),
            })?;

        debug!("using font `{family}` at {FONT_SIZE_PX}px");
        Ok(Self { family, font })
    }

    /// Loads a face directly from font file data.
    pub fn from_data(
        family: impl Into<String>,
        data: Vec<u8>,
        index: u32,
    ) -> Result<Self, RenderError> {
        let family = family.into();
        match FontVec::try_from_vec_and_index(data, index) {
            Ok(font) => Ok(Self { family, font }),
            Err(err) => Err(RenderError::FontLoad {
                family,
                err: Some(err),
            }),
        }
    }

    /// Returns the family name of the face.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the face scaled to [`FONT_SIZE_PX`].
    pub(crate) fn scaled(&self) -> PxScaleFont<&FontVec> {
        self.font.as_scaled(PxScale::from(FONT_SIZE_PX))
    }
}

impl fmt::Debug for SummaryFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// The face bundled for tests, so that rendering tests do not depend on installed fonts.
#[cfg(test)]
pub(crate) fn test_font() -> SummaryFont {
    SummaryFont::from_data("DejaVu Sans", TEST_FONT_DATA.to_vec(), 0).expect("bundled font loads")
}

#[cfg(test)]
const TEST_FONT_DATA: &[u8] = include_bytes!("../../tests/fonts/DejaVuSans.ttf");
