//! Whop API クライアント
//!
//! 決済レコードの取得は REST、課金作成は GraphQL の `chargeUser` を使う。

mod client;
mod graphql;

pub use client::WhopClient;
