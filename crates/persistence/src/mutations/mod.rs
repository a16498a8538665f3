// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations. Each function runs against the caller's
//! connection so a surrounding Diesel transaction covers every write.

pub mod cases;
pub mod counselors;
pub mod customers;
