//! Swap 流程集成测试
//!
//! 全部运行在 MockChain 上，不需要节点:
//!     cargo test --test swap_flow_tests

use alloy::primitives::{Address, U256};
use std::sync::Arc;
use std::time::Duration;
use v2_swap_sdk::common::error::CHECKSUM_HINT;
use v2_swap_sdk::common::{ChainEvent, MockChain};
use v2_swap_sdk::contracts::abi::{IERC20, IUniswapV2Router02};
use v2_swap_sdk::SwapError;

mod test_helpers;
use test_helpers::*;

/// amount 0.01 ETH, slippage 1%, native input -> swapExactETHForTokens
#[tokio::test]
async fn test_native_swap_end_to_end() {
    let weth = Address::repeat_byte(0x77);
    let chain = Arc::new(default_chain().with_weth(weth));
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let outcome = app.execute_swap().await.expect("swap should succeed");

    // 0.01 ETH * 2000 = 20 UNI, 1% slippage -> 19.8 UNI
    let amount_in = U256::from(10_000_000_000_000_000u64);
    let estimated = ether(20);
    let min_out = estimated * U256::from(99u64) / U256::from(100u64);
    assert_eq!(outcome.quote.amount_in, amount_in);
    assert_eq!(outcome.quote.estimated_out, estimated);
    assert_eq!(outcome.quote.min_amount_out, min_out);
    assert!(outcome.approval.is_none());
    assert!(outcome.swap.success);

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 1, "only the swap is sent for native input");
    let swap = sent[0]
        .decode::<IUniswapV2Router02::swapExactETHForTokensCall>()
        .expect("swapExactETHForTokens calldata");
    assert_eq!(sent[0].to, chain.router());
    assert_eq!(sent[0].value, amount_in);
    assert_eq!(sent[0].from, Some(account()));
    assert_eq!(swap.amountOutMin, min_out);
    // path 以 router.WETH() 返回的地址开头，而不是硬编码
    assert_eq!(swap.path, vec![weth, UNI]);
    assert_eq!(swap.to, account());

    let now = chrono::Utc::now().timestamp() as u64;
    let deadline: u64 = swap.deadline.to::<u64>();
    assert!(deadline > now + 60 * 19 && deadline <= now + 60 * 20 + 5);

    assert!(app.status().current().starts_with("Swap succeeded: "));
    assert_eq!(app.account(), Some(account()), "swap connects implicitly");
}

#[tokio::test]
async fn test_token_swap_with_sufficient_allowance_skips_approve() {
    let chain = Arc::new(
        default_chain()
            .with_token(USDC_LIKE, 6)
            .with_allowance(USDC_LIKE, account(), v2_swap_sdk::constants::SEPOLIA_V2_ROUTER, U256::MAX),
    );
    let app = create_test_app(chain.clone());
    fill_form(&app, USDC_LIKE_STR, UNI_STR, "5", "2");

    let outcome = app.execute_swap().await.unwrap();
    assert!(outcome.approval.is_none());

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert!(!sent.iter().any(|tx| tx.is::<IERC20::approveCall>()));

    let swap = sent[0].decode::<IUniswapV2Router02::swapExactTokensForTokensCall>().unwrap();
    assert_eq!(swap.amountIn, U256::from(5_000_000u64));
    assert_eq!(swap.path, vec![USDC_LIKE, UNI]);
    assert_eq!(swap.amountOutMin, U256::from(9_800_000_000u64)); // 5e6 * 2000 * 98%
    assert_eq!(sent[0].value, U256::ZERO);
}

#[tokio::test]
async fn test_token_swap_approves_and_confirms_before_swapping() {
    let router = v2_swap_sdk::constants::SEPOLIA_V2_ROUTER;
    let chain = Arc::new(
        default_chain()
            .with_token(USDC_LIKE, 6)
            .with_allowance(USDC_LIKE, account(), router, U256::from(1_000u64)),
    );
    let app = create_test_app(chain.clone());
    fill_form(&app, USDC_LIKE_STR, UNI_STR, "5", "1");

    let outcome = app.execute_swap().await.unwrap();
    let approval = outcome.approval.expect("approval expected");
    assert!(approval.success);

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 2);
    let approve = sent[0].decode::<IERC20::approveCall>().expect("first tx is approve");
    assert_eq!(sent[0].to, USDC_LIKE);
    assert_eq!(approve.spender, router);
    assert_eq!(approve.amount, U256::from(5_000_000u64));
    assert!(sent[1].is::<IUniswapV2Router02::swapExactTokensForTokensCall>());

    // approve 确认之后才发送 swap
    let events = chain.events();
    let approve_confirmed = events
        .iter()
        .position(|e| *e == ChainEvent::Confirmed(approval.hash))
        .expect("approval confirmed");
    let swap_sent = events
        .iter()
        .position(|e| matches!(e, ChainEvent::Sent(tx) if tx.hash == outcome.swap.hash))
        .expect("swap sent");
    assert!(approve_confirmed < swap_sent);

    // 授权额度刚好被 swap 用完
    assert_eq!(chain.allowance(USDC_LIKE, account(), router), U256::ZERO);
}

#[tokio::test]
async fn test_token_swap_with_exact_allowance_skips_approve() {
    let router = v2_swap_sdk::constants::SEPOLIA_V2_ROUTER;
    let chain = Arc::new(
        default_chain()
            .with_token(USDC_LIKE, 6)
            .with_allowance(USDC_LIKE, account(), router, U256::from(5_000_000u64)),
    );
    let app = create_test_app(chain.clone());
    fill_form(&app, USDC_LIKE_STR, UNI_STR, "5", "1");

    let outcome = app.execute_swap().await.unwrap();
    assert!(outcome.approval.is_none());

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].is::<IUniswapV2Router02::swapExactTokensForTokensCall>());
    assert_eq!(chain.allowance(USDC_LIKE, account(), router), U256::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_approval_hash_reported_while_confirming() {
    let router = v2_swap_sdk::constants::SEPOLIA_V2_ROUTER;
    let chain = Arc::new(
        default_chain()
            .with_token(USDC_LIKE, 6)
            .with_confirm_delay(Duration::from_secs(1)),
    );
    let app = Arc::new(create_test_app(chain.clone()));
    fill_form(&app, USDC_LIKE_STR, UNI_STR, "5", "1");

    let flow = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.execute_swap().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].is::<IERC20::approveCall>());
    assert_eq!(app.status().current(), format!("Approval sent: {}", sent[0].hash));

    let outcome = flow.await.unwrap().unwrap();
    assert_eq!(outcome.approval.map(|r| r.hash), Some(sent[0].hash));
    assert_eq!(chain.allowance(USDC_LIKE, account(), router), U256::ZERO);
}

#[tokio::test]
async fn test_invalid_slippage_rejected_before_any_call() {
    for slippage in ["-1", "abc", "1%"] {
        let chain = Arc::new(default_chain());
        let app = create_test_app(chain.clone());
        fill_form(&app, "", UNI_STR, "0.01", slippage);

        let err = app.execute_swap().await.unwrap_err();
        assert!(matches!(err, SwapError::InvalidSlippage(_)), "{slippage}: {err}");
        assert!(chain.is_untouched(), "{slippage}: chain must not be touched");
        assert!(app.status().current().starts_with("Invalid slippage value"));
    }
}

#[tokio::test]
async fn test_empty_slippage_uses_default() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "1", "");

    let outcome = app.execute_swap().await.unwrap();
    assert_eq!(outcome.quote.min_amount_out, ether(1980));
}

#[tokio::test]
async fn test_missing_token_out() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain.clone());
    fill_form(&app, "", "", "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::MissingTokenOut));
    assert!(chain.is_untouched());
    assert_eq!(app.status().current(), "Please fill in the Token Out address");
}

#[tokio::test]
async fn test_missing_wallet_provider() {
    let app = create_app_without_wallet();
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::MissingWallet));
    assert!(app.status().current().starts_with("No wallet provider found"));
    assert!(!app.is_busy());
}

#[tokio::test]
async fn test_checksum_error_gets_hint() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain.clone());
    // 大小写混合但 checksum 错误
    fill_form(&app, "", "0x1F9840a85d5aF5bf1D1762F925BDADdC4201F984", "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::InvalidChecksum(_)));
    assert_eq!(app.status().current(), CHECKSUM_HINT);
    assert!(chain.is_untouched());
}

#[tokio::test]
async fn test_negative_amount_rejected() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "-0.5", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::InvalidAmount(_)));
    assert!(chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_reverted_swap_reports_error_and_app_stays_usable() {
    let chain = Arc::new(default_chain().reverting_swaps());
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::TransactionReverted(_)));
    assert!(app.status().current().starts_with("Error: transaction"));
    assert!(!app.is_busy());

    // 失败后依然可以再次操作
    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::TransactionReverted(_)));
    assert_eq!(chain.sent_transactions().len(), 2);
}

#[tokio::test]
async fn test_empty_quote_is_an_error() {
    let chain = Arc::new(default_chain().with_amounts_out(vec![]));
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::EmptyQuote));
    assert!(chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_unknown_output_token_passes_contract_error_through() {
    let chain = Arc::new(MockChain::new(account()).with_rate(1, 1));
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::Rpc(_)));
    assert_eq!(app.status().current(), "Error: execution reverted: call to non-contract account");
}

#[tokio::test]
async fn test_quote_only_sends_nothing() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain.clone());
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let quote = app.request_quote().await.unwrap();
    assert_eq!(quote.estimated_out, ether(20));
    assert!(chain.sent_transactions().is_empty());
    assert!(chain.call_count() >= 3); // WETH, getAmountsOut, decimals
    assert_eq!(app.status().current(), "Estimated output: 20.0, minimum accepted: 19.8");
}

#[tokio::test(start_paused = true)]
async fn test_second_swap_rejected_while_first_in_flight() {
    let chain = Arc::new(default_chain().with_confirm_delay(Duration::from_secs(1)));
    let app = Arc::new(create_test_app(chain.clone()));
    fill_form(&app, "", UNI_STR, "0.01", "1");

    let first = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.execute_swap().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(app.is_busy());

    let err = app.execute_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::FlowInProgress));

    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.swap.success);
    assert!(!app.is_busy());
    assert_eq!(chain.sent_transactions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_status_clears_after_delay() {
    let chain = Arc::new(default_chain());
    let app = create_test_app(chain);
    fill_form(&app, "", UNI_STR, "0.01", "1");

    app.execute_swap().await.unwrap();
    assert!(app.status().current().starts_with("Swap succeeded"));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(app.status().current(), "");
}
