//! Route handlers.
//!
//! | Method | Path | Auth | Notes |
//! |--------|------|------|-------|
//! | `GET`  | `/pages/{slug}` | no | Assembled page document |
//! | `GET`  | `/admin/pages` | yes | Page list |
//! | `GET`  | `/admin/pages/{slug}` | yes | Schema + current editor values |
//! | `PUT`  | `/admin/pages/{slug}` | yes | Flat `{key: value}` body; per-entry report |
//! | `GET`  | `/admin/stats` | yes | Completion per page, registry order |

pub mod admin;
pub mod pages;
