//! # Crypto Checkout
//!
//! The browser wallet does the signing and submission. We only decide what it should sign
//! and record the resulting transaction hash against an order.
//!
//! ## Networks
//! - Ethereum mainnet (chain id 1)
//! - Base (chain id 8453)
//!
//! ## Tokens
//! - ETH: native transfer, priced from a fixed USD quote
//! - USDC, USDT: 6 decimals, 1 token = 1 USD, sent through the ERC-20 `transfer` call
//!
//! ## Flow
//! 1. Frontend picks network + token, asks for a quote
//! 2. We answer with a [`TransferRequest`] the wallet can submit as-is
//! 3. Wallet reports its chain id and the transaction hash, we refuse mismatched chains
//! 4. Order is stored as `pending`, receipt polling flips it to `confirmed`/`failed`
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `transfer(address,uint256)`
const ERC20_TRANSFER_SELECTOR: &str = "a9059cbb";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Wallet is on chain {actual}, expected {expected}")]
    NetworkMismatch { expected: u64, actual: u64 },

    #[error("{token} is not available on {network}")]
    UnsupportedToken { network: Network, token: Token },

    #[error("Order total must be greater than zero")]
    InvalidAmount,

    #[error("ETH price quote must be greater than zero")]
    InvalidPrice,

    #[error("Malformed address: {0}")]
    InvalidAddress(String),

    #[error("Malformed transaction hash: {0}")]
    InvalidTxHash(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Ethereum,
    Base,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Eth,
    Usdc,
    Usdt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Ethereum, Network::Base];

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Ethereum => 1,
            Network::Base => 8453,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum",
            Network::Base => "Base",
        }
    }

    pub fn explorer_tx_url(self, tx_hash: &str) -> String {
        match self {
            Network::Ethereum => format!("https://etherscan.io/tx/{tx_hash}"),
            Network::Base => format!("https://basescan.org/tx/{tx_hash}"),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Token {
    pub const ALL: [Token; 3] = [Token::Eth, Token::Usdc, Token::Usdt];

    pub fn symbol(self) -> &'static str {
        match self {
            Token::Eth => "ETH",
            Token::Usdc => "USDC",
            Token::Usdt => "USDT",
        }
    }

    pub fn decimals(self) -> u32 {
        match self {
            Token::Eth => 18,
            Token::Usdc | Token::Usdt => 6,
        }
    }

    pub fn is_stablecoin(self) -> bool {
        matches!(self, Token::Usdc | Token::Usdt)
    }

    /// `None` for the native token.
    pub fn contract(self, network: Network) -> Option<&'static str> {
        match (self, network) {
            (Token::Eth, _) => None,
            (Token::Usdc, Network::Ethereum) => Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            (Token::Usdt, Network::Ethereum) => Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            (Token::Usdc, Network::Base) => Some("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            (Token::Usdt, Network::Base) => Some("0xfde4C96c8593536E31F229EA8f37b2ADa2699bb2"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenOption {
    pub token: Token,
    pub symbol: &'static str,
    pub decimals: u32,
    pub contract: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkOption {
    pub network: Network,
    pub name: &'static str,
    pub chain_id: u64,
    pub tokens: Vec<TokenOption>,
}

pub fn tokens_for(network: Network) -> Vec<Token> {
    Token::ALL
        .into_iter()
        .filter(|token| *token == Token::Eth || token.contract(network).is_some())
        .collect()
}

pub fn options() -> Vec<NetworkOption> {
    Network::ALL
        .into_iter()
        .map(|network| NetworkOption {
            network,
            name: network.name(),
            chain_id: network.chain_id(),
            tokens: tokens_for(network)
                .into_iter()
                .map(|token| TokenOption {
                    token,
                    symbol: token.symbol(),
                    decimals: token.decimals(),
                    contract: token.contract(network),
                })
                .collect(),
        })
        .collect()
}

/// Converts a USD total into the token's smallest unit.
pub fn amount_in_base_units(
    total_cents: u64,
    token: Token,
    eth_usd_cents: u64,
) -> Result<u128, CheckoutError> {
    if total_cents == 0 {
        return Err(CheckoutError::InvalidAmount);
    }

    if token.is_stablecoin() {
        // 1 token = 100 cents = 10^decimals units
        return Ok(total_cents as u128 * 10u128.pow(token.decimals() - 2));
    }

    if eth_usd_cents == 0 {
        return Err(CheckoutError::InvalidPrice);
    }

    Ok(total_cents as u128 * 10u128.pow(token.decimals()) / eth_usd_cents as u128)
}

/// Exactly what the wallet is asked to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub network: Network,
    pub chain_id: u64,
    pub token: Token,
    pub to: String,
    pub value: String,
    pub data: String,
    pub amount: String,
}

pub fn transfer_request(
    network: Network,
    token: Token,
    merchant: &str,
    amount: u128,
) -> Result<TransferRequest, CheckoutError> {
    let merchant = validate_address(merchant)?;

    let (to, value, data) = match token.contract(network) {
        None if token == Token::Eth => (merchant.to_string(), format!("0x{amount:x}"), "0x".to_string()),
        None => return Err(CheckoutError::UnsupportedToken { network, token }),
        Some(contract) => (
            contract.to_string(),
            "0x0".to_string(),
            erc20_transfer_data(merchant, amount),
        ),
    };

    Ok(TransferRequest {
        network,
        chain_id: network.chain_id(),
        token,
        to,
        value,
        data,
        amount: amount.to_string(),
    })
}

fn erc20_transfer_data(recipient: &str, amount: u128) -> String {
    let address = recipient.trim_start_matches("0x").to_ascii_lowercase();

    format!("0x{ERC20_TRANSFER_SELECTOR}{address:0>64}{amount:064x}")
}

pub fn ensure_network(selected: Network, wallet_chain_id: u64) -> Result<(), CheckoutError> {
    if selected.chain_id() != wallet_chain_id {
        return Err(CheckoutError::NetworkMismatch {
            expected: selected.chain_id(),
            actual: wallet_chain_id,
        });
    }

    Ok(())
}

pub fn validate_address(address: &str) -> Result<&str, CheckoutError> {
    match address.strip_prefix("0x").map(hex::decode) {
        Some(Ok(bytes)) if bytes.len() == 20 => Ok(address),
        _ => Err(CheckoutError::InvalidAddress(address.to_string())),
    }
}

pub fn validate_tx_hash(tx_hash: &str) -> Result<String, CheckoutError> {
    let tx_hash = tx_hash.trim();

    match tx_hash.strip_prefix("0x").map(hex::decode) {
        Some(Ok(bytes)) if bytes.len() == 32 => Ok(tx_hash.to_ascii_lowercase()),
        _ => Err(CheckoutError::InvalidTxHash(tx_hash.to_string())),
    }
}
