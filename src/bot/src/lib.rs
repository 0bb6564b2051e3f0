//! Telegram front-end for querying a Cosmos-SDK chain.
//!
//! The binary wires a [`telegram::TelegramClient`] long-poll loop to the
//! command handlers in [`commands`], which query the node through
//! `chain_query` and format replies as Telegram HTML.

pub mod commands;
pub mod config;
pub mod markets;
pub mod render;
pub mod telegram;
