//! # xenbuild
//!
//! Build driver for the XenServer Windows guest agent package.
//!
//! ## Usage
//!
//! ```bash
//! xenbuild checked   # Debug build of every solution
//! xenbuild free      # Release build of every solution
//! ```
//!
//! Run at the root of the guest agent checkout. One linear pass: stamp
//! `VerInfo.cs` with version and branding constants, drive the external
//! build tool once per solution, stage each sub-project's outputs under
//! `xenguestagent/`, snapshot the tracked sources, and bundle everything
//! into `xenguestagent.tar`.

pub mod build;
