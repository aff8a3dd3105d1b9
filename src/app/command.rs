//! Console commands, one per line

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Disconnect,
    /// Empty value clears the field (native ETH input)
    TokenIn(String),
    TokenOut(String),
    Amount(String),
    Slippage(String),
    ShowForm,
    Quote,
    Swap,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "connect" => Command::Connect,
            "disconnect" => Command::Disconnect,
            "from" | "in" => Command::TokenIn(rest.to_string()),
            "to" | "out" => Command::TokenOut(rest.to_string()),
            "amount" => Command::Amount(rest.to_string()),
            "slippage" => Command::Slippage(rest.to_string()),
            "form" => Command::ShowForm,
            "quote" => Command::Quote,
            "swap" => Command::Swap,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  connect              request wallet account access
  disconnect           forget the connected account
  from <addr>          Token In address (empty = native ETH via router WETH)
  to <addr>            Token Out address
  amount <value>       amount in human units (default 0.01)
  slippage <pct>       slippage percent (default 1)
  form                 print the current form
  quote                query getAmountsOut without sending anything
  swap                 execute the swap
  quit";
