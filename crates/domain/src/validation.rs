// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum case title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Validates a case title.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or blank
/// - The title exceeds [`MAX_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::EmptyTitle);
    }

    let len: usize = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(DomainError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates counsel note content.
///
/// # Errors
///
/// Returns `DomainError::EmptyNoteContent` if the content is empty or blank.
pub fn validate_note_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::EmptyNoteContent);
    }
    Ok(())
}
