// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Coin parameter table and amount display formatting

use core::fmt::Write;

use heapless::String;

/// Base units per coin
const COIN_FRACTION: u64 = 100_000_000;

/// Parameters of a supported coin, fixed for the life of a signing session
#[derive(Clone, PartialEq, Debug)]
pub struct CoinParams {
    pub coin_name: &'static str,
    pub coin_shortcut: &'static str,

    /// base58check version byte for P2PKH addresses
    pub address_type: u8,

    /// base58check version byte for P2SH addresses
    pub address_type_p2sh: u8,

    /// Fee threshold in base units per kilobyte above which the user must
    /// explicitly confirm the fee
    pub maxfee_kb: u64,
}

pub const BITCOIN: CoinParams = CoinParams {
    coin_name: "Bitcoin",
    coin_shortcut: "BTC",
    address_type: 0,
    address_type_p2sh: 5,
    maxfee_kb: 100_000,
};

pub const TESTNET: CoinParams = CoinParams {
    coin_name: "Testnet",
    coin_shortcut: "TEST",
    address_type: 111,
    address_type_p2sh: 196,
    maxfee_kb: 10_000_000,
};

pub const LITECOIN: CoinParams = CoinParams {
    coin_name: "Litecoin",
    coin_shortcut: "LTC",
    address_type: 48,
    address_type_p2sh: 5,
    maxfee_kb: 40_000_000,
};

pub const DOGECOIN: CoinParams = CoinParams {
    coin_name: "Dogecoin",
    coin_shortcut: "DOGE",
    address_type: 30,
    address_type_p2sh: 22,
    maxfee_kb: 1_000_000_000,
};

pub const COINS: &[CoinParams] = &[BITCOIN, TESTNET, LITECOIN, DOGECOIN];

/// Look up coin parameters by name
pub fn by_name(name: &str) -> Option<&'static CoinParams> {
    COINS.iter().find(|c| c.coin_name == name)
}

impl CoinParams {
    /// Format an amount in base units for display, eg. `12345` → "0.00012345 BTC".
    ///
    /// Trailing fractional zeroes are trimmed down to one digit, so a whole
    /// amount renders as "1.0 BTC" and zero as "0.0 BTC".
    pub fn format_amount(&self, amount: u64) -> String<32> {
        let mut s = String::new();

        let whole = amount / COIN_FRACTION;
        let frac = amount % COIN_FRACTION;

        let _ = write!(&mut s, "{}.", whole);

        if frac == 0 {
            let _ = s.push('0');
        } else {
            let mut digits = [0u8; 8];
            let mut v = frac;
            for d in digits.iter_mut().rev() {
                *d = (v % 10) as u8;
                v /= 10;
            }
            let last = digits.iter().rposition(|d| *d != 0).unwrap_or(0);
            for d in &digits[..=last] {
                let _ = s.push((b'0' + d) as char);
            }
        }

        let _ = s.push(' ');
        let _ = s.push_str(self.coin_shortcut);

        s
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn amount_formatting() {
        let tests: &[(u64, &str)] = &[
            (0, "0.0 BTC"),
            (1, "0.00000001 BTC"),
            (10_000, "0.0001 BTC"),
            (100_000_000, "1.0 BTC"),
            (123_456_789, "1.23456789 BTC"),
            (6_100_000_000, "61.0 BTC"),
            (100_000_000_000_000, "1000000.0 BTC"),
        ];

        for (v, s) in tests {
            assert_eq!(BITCOIN.format_amount(*v).as_str(), *s, "amount {v}");
        }
    }

    #[test]
    fn coin_lookup() {
        assert_eq!(by_name("Bitcoin"), Some(&BITCOIN));
        assert_eq!(by_name("Dogecoin").map(|c| c.address_type), Some(30));
        assert_eq!(by_name("Florin"), None);
    }
}
