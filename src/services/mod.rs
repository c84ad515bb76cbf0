// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod library;
pub mod youtube;

pub use library::ChannelLibrary;
pub use youtube::YouTubeClient;
