//! In-memory chain for tests and dry runs
//!
//! 实现 [`WalletProvider`]，按 selector 解码 calldata，模拟 router 与 ERC-20 的行为：
//! - `WETH()` / `getAmountsOut` / `decimals` / `allowance` 只读调用
//! - `approve` 立即生效，`swapExact*` 按 allowance 与失败开关决定回执状态
//! - 所有调用、发送、确认按顺序记录在 [`ChainEvent`] 里，便于断言时序

use crate::common::SwapError;
use crate::constants::SEPOLIA_V2_ROUTER;
use crate::contracts::abi::{IERC20, IUniswapV2Router02};
use crate::wallet::{ContractCall, TxReceipt, WalletProvider};
use alloy::primitives::{Address, Bytes, TxHash, U256, address, keccak256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// WETH on Sepolia
pub const MOCK_WETH: Address = address!("0xfff9976782d46cc05630d1f6ebab18b2324d6b14");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTx {
    pub hash: TxHash,
    pub from: Option<Address>,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl SentTx {
    pub fn is<C: SolCall>(&self) -> bool {
        self.data.len() >= 4 && self.data[..4] == C::SELECTOR
    }

    pub fn decode<C: SolCall>(&self) -> Option<C> {
        if !self.is::<C>() {
            return None;
        }
        C::abi_decode(&self.data).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    Call { to: Address, selector: [u8; 4] },
    Sent(SentTx),
    Confirmed(TxHash),
}

struct MockState {
    accounts: Vec<Address>,
    accounts_error: Option<String>,
    router: Address,
    weth: Address,
    decimals: HashMap<Address, u8>,
    /// (token, owner, spender) -> amount
    allowances: HashMap<(Address, Address, Address), U256>,
    /// Per-hop output = input * rate.0 / rate.1
    rate: (U256, U256),
    amounts_override: Option<Vec<U256>>,
    revert_swaps: bool,
    confirm_delay: Duration,
    nonce: u64,
    receipts: HashMap<TxHash, TxReceipt>,
    events: Vec<ChainEvent>,
}

pub struct MockChain {
    state: Mutex<MockState>,
}

impl MockChain {
    /// One account, Sepolia router, Sepolia WETH (18 decimals), rate 1:1
    pub fn new(account: Address) -> Self {
        let mut decimals = HashMap::new();
        decimals.insert(MOCK_WETH, 18);
        Self {
            state: Mutex::new(MockState {
                accounts: vec![account],
                accounts_error: None,
                router: SEPOLIA_V2_ROUTER,
                weth: MOCK_WETH,
                decimals,
                allowances: HashMap::new(),
                rate: (U256::from(1u64), U256::from(1u64)),
                amounts_override: None,
                revert_swaps: false,
                confirm_delay: Duration::ZERO,
                nonce: 0,
                receipts: HashMap::new(),
                events: Vec::new(),
            }),
        }
    }

    pub fn with_router(self, router: Address) -> Self {
        self.state.lock().router = router;
        self
    }

    pub fn with_weth(self, weth: Address) -> Self {
        {
            let mut state = self.state.lock();
            state.weth = weth;
            state.decimals.insert(weth, 18);
        }
        self
    }

    pub fn with_token(self, token: Address, decimals: u8) -> Self {
        self.state.lock().decimals.insert(token, decimals);
        self
    }

    pub fn with_allowance(self, token: Address, owner: Address, spender: Address, amount: U256) -> Self {
        self.state.lock().allowances.insert((token, owner, spender), amount);
        self
    }

    pub fn with_rate(self, numerator: u64, denominator: u64) -> Self {
        self.state.lock().rate = (U256::from(numerator), U256::from(denominator));
        self
    }

    /// Return exactly these amounts from `getAmountsOut`
    pub fn with_amounts_out(self, amounts: Vec<U256>) -> Self {
        self.state.lock().amounts_override = Some(amounts);
        self
    }

    pub fn with_accounts_error(self, message: impl Into<String>) -> Self {
        self.state.lock().accounts_error = Some(message.into());
        self
    }

    pub fn without_accounts(self) -> Self {
        self.state.lock().accounts.clear();
        self
    }

    /// Every swap is mined with a failed status
    pub fn reverting_swaps(self) -> Self {
        self.state.lock().revert_swaps = true;
        self
    }

    pub fn with_confirm_delay(self, delay: Duration) -> Self {
        self.state.lock().confirm_delay = delay;
        self
    }

    pub fn router(&self) -> Address {
        self.state.lock().router
    }

    pub fn weth(&self) -> Address {
        self.state.lock().weth
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state.lock().allowances.get(&(token, owner, spender)).copied().unwrap_or_default()
    }

    pub fn events(&self) -> Vec<ChainEvent> {
        self.state.lock().events.clone()
    }

    pub fn sent_transactions(&self) -> Vec<SentTx> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                ChainEvent::Sent(tx) => Some(tx.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().events.iter().filter(|e| matches!(e, ChainEvent::Call { .. })).count()
    }

    /// Nothing at all reached the chain
    pub fn is_untouched(&self) -> bool {
        self.state.lock().events.is_empty()
    }
}

fn selector(data: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    if data.len() >= 4 {
        out.copy_from_slice(&data[..4]);
    }
    out
}

fn reverted(reason: &str) -> SwapError {
    SwapError::Rpc(format!("execution reverted: {reason}"))
}

fn decode<C: SolCall>(data: &[u8]) -> Result<C, SwapError> {
    C::abi_decode(data).map_err(|e| SwapError::Rpc(format!("invalid calldata: {e}")))
}

impl MockState {
    fn quote(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, SwapError> {
        if let Some(amounts) = &self.amounts_override {
            return Ok(amounts.clone());
        }
        if path.len() < 2 {
            return Err(reverted("UniswapV2Library: INVALID_PATH"));
        }
        let mut amounts = vec![amount_in];
        let mut current = amount_in;
        for _ in 1..path.len() {
            current = current * self.rate.0 / self.rate.1;
            amounts.push(current);
        }
        Ok(amounts)
    }

    fn read(&self, call: &ContractCall) -> Result<Bytes, SwapError> {
        let data = call.data.as_ref();
        let sel = selector(data);

        if call.to == self.router {
            if sel == IUniswapV2Router02::WETHCall::SELECTOR {
                return Ok(self.weth.abi_encode().into());
            }
            if sel == IUniswapV2Router02::getAmountsOutCall::SELECTOR {
                let args = decode::<IUniswapV2Router02::getAmountsOutCall>(data)?;
                return Ok(self.quote(args.amountIn, &args.path)?.abi_encode().into());
            }
            return Err(reverted("unknown router function"));
        }

        let Some(decimals) = self.decimals.get(&call.to).copied() else {
            return Err(reverted("call to non-contract account"));
        };
        if sel == IERC20::decimalsCall::SELECTOR {
            return Ok(U256::from(decimals).abi_encode().into());
        }
        if sel == IERC20::allowanceCall::SELECTOR {
            let args = decode::<IERC20::allowanceCall>(data)?;
            let amount = self
                .allowances
                .get(&(call.to, args.owner, args.spender))
                .copied()
                .unwrap_or_default();
            return Ok(amount.abi_encode().into());
        }
        Err(reverted("unknown token function"))
    }

    /// Applies the transaction and returns whether it succeeded
    fn execute(&mut self, call: &ContractCall) -> Result<bool, SwapError> {
        let data = call.data.as_ref();
        let sel = selector(data);
        let from = call.from.unwrap_or_default();

        if call.to == self.router {
            if self.revert_swaps {
                return Ok(false);
            }
            if sel == IUniswapV2Router02::swapExactETHForTokensCall::SELECTOR {
                let args = decode::<IUniswapV2Router02::swapExactETHForTokensCall>(data)?;
                let out = self.quote(call.value, &args.path)?;
                return Ok(args.path.first() == Some(&self.weth)
                    && out.last().is_some_and(|o| *o >= args.amountOutMin));
            }
            if sel == IUniswapV2Router02::swapExactTokensForTokensCall::SELECTOR {
                let args = decode::<IUniswapV2Router02::swapExactTokensForTokensCall>(data)?;
                let Some(token_in) = args.path.first().copied() else {
                    return Ok(false);
                };
                let key = (token_in, from, self.router);
                let allowance = self.allowances.get(&key).copied().unwrap_or_default();
                if allowance < args.amountIn {
                    return Ok(false);
                }
                self.allowances.insert(key, allowance - args.amountIn);
                let out = self.quote(args.amountIn, &args.path)?;
                return Ok(out.last().is_some_and(|o| *o >= args.amountOutMin));
            }
            return Err(reverted("unknown router function"));
        }

        if self.decimals.contains_key(&call.to) && sel == IERC20::approveCall::SELECTOR {
            let args = decode::<IERC20::approveCall>(data)?;
            self.allowances.insert((call.to, from, args.spender), args.amount);
            return Ok(true);
        }
        Err(reverted("unsupported transaction"))
    }
}

#[async_trait]
impl WalletProvider for MockChain {
    async fn request_accounts(&self) -> Result<Vec<Address>, SwapError> {
        let state = self.state.lock();
        match &state.accounts_error {
            Some(message) => Err(SwapError::Rpc(message.clone())),
            None => Ok(state.accounts.clone()),
        }
    }

    async fn call(&self, call: ContractCall) -> Result<Bytes, SwapError> {
        let mut state = self.state.lock();
        state.events.push(ChainEvent::Call { to: call.to, selector: selector(&call.data) });
        state.read(&call)
    }

    async fn send_transaction(&self, call: ContractCall) -> Result<TxHash, SwapError> {
        let mut state = self.state.lock();
        let success = state.execute(&call)?;

        state.nonce += 1;
        let hash = keccak256(state.nonce.to_be_bytes());
        let block_number = Some(state.nonce);
        state.receipts.insert(hash, TxReceipt { hash, block_number, success });
        state.events.push(ChainEvent::Sent(SentTx {
            hash,
            from: call.from,
            to: call.to,
            value: call.value,
            data: call.data,
        }));
        Ok(hash)
    }

    async fn wait_for_confirmation(&self, hash: TxHash) -> Result<TxReceipt, SwapError> {
        let delay = self.state.lock().confirm_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        let receipt = state
            .receipts
            .get(&hash)
            .copied()
            .ok_or_else(|| SwapError::Rpc(format!("unknown transaction {hash}")))?;
        state.events.push(ChainEvent::Confirmed(hash));
        Ok(receipt)
    }
}
