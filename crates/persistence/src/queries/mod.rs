// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side operations. Case search builds its page and count statements
//! from one shared filter builder so the two can never disagree.

pub mod cases;
pub mod counselors;
pub mod customers;
