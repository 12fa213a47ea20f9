//! # Food Service ライブラリ
//!
//! ルーター構築・ハンドラ・ユースケースを公開する。
//! 統合テストから同じルーターを組み立てられるようにするため、
//! `main.rs` とは分けている。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod link;
pub mod usecase;
