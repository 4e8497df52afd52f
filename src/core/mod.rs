// ─── PurrLauncher Core ───
// Modular backend for a custom modpack launcher.
//
// Architecture:
//   core/
//     config      — config.json persistence + validation
//     auth        — backend token validation, Yggdrasil session, offline identity
//     pack        — content-pack sync against a remote manifest
//     version     — typed version descriptor model
//     maven       — library coordinate parsing
//     downloader  — retrying, SHA-1 validated downloads
//     archive     — zip extraction
//     java        — bundled Java runtime provisioning
//     launch      — rules, placeholders, classpath, argument assembly, spawn

pub mod archive;
pub mod auth;
pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod java;
pub mod launch;
pub mod maven;
pub mod pack;
pub mod version;
