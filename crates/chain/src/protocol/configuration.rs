//! Packed configuration words stored on reserve and NFT pool records.
//!
//! Both words are `uint256` bitmaps. Reserves:
//!
//! ```text
//! bit 0-15   LTV                      bit 56  active
//! bit 16-31  liquidation threshold    bit 57  frozen
//! bit 32-47  liquidation bonus        bit 58  borrowing enabled
//! bit 48-55  decimals                 bit 59  stable rate borrowing enabled
//! bit 64-79  reserve factor
//! ```
//!
//! NFT pools:
//!
//! ```text
//! bit 0-15   LTV                      bit 56  active
//! bit 16-31  liquidation threshold    bit 57  frozen
//! bit 32-47  liquidation bonus        bit 64-71   redeem duration (hours)
//! bit 72-79  auction duration (hours) bit 80-95   redeem fine
//! bit 96-111 redeem threshold         bit 112-127 min bid fine
//! ```

use alloy::primitives::U256;

const LTV_OFFSET: usize = 0;
const LIQUIDATION_THRESHOLD_OFFSET: usize = 16;
const LIQUIDATION_BONUS_OFFSET: usize = 32;
const DECIMALS_OFFSET: usize = 48;
const ACTIVE_BIT: usize = 56;
const FROZEN_BIT: usize = 57;
const BORROWING_BIT: usize = 58;
const STABLE_BORROWING_BIT: usize = 59;
const RESERVE_FACTOR_OFFSET: usize = 64;

const REDEEM_DURATION_OFFSET: usize = 64;
const AUCTION_DURATION_OFFSET: usize = 72;
const REDEEM_FINE_OFFSET: usize = 80;
const REDEEM_THRESHOLD_OFFSET: usize = 96;
const MIN_BID_FINE_OFFSET: usize = 112;

fn mask(width: usize) -> U256 {
    (U256::from(1u8) << width) - U256::from(1u8)
}

/// Read `width` bits starting at `offset`. `width` never exceeds 16 here.
fn read(word: U256, offset: usize, width: usize) -> u64 {
    ((word >> offset) & mask(width)).to::<u64>()
}

fn write(word: U256, offset: usize, width: usize, value: u64) -> U256 {
    let field = mask(width) << offset;
    (word & !field) | ((U256::from(value) & mask(width)) << offset)
}

fn flag(word: U256, bit: usize) -> bool {
    word.bit(bit)
}

fn set_flag(word: U256, bit: usize, value: bool) -> U256 {
    write(word, bit, 1, value as u64)
}

/// Reserve configuration bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReserveConfiguration(U256);

impl ReserveConfiguration {
    /// Wrap a raw configuration word.
    pub const fn new(word: U256) -> Self {
        Self(word)
    }

    /// The raw word.
    pub fn word(&self) -> U256 {
        self.0
    }

    /// Loan-to-value in basis points.
    pub fn ltv(&self) -> u16 {
        read(self.0, LTV_OFFSET, 16) as u16
    }

    /// Liquidation threshold in basis points.
    pub fn liquidation_threshold(&self) -> u16 {
        read(self.0, LIQUIDATION_THRESHOLD_OFFSET, 16) as u16
    }

    /// Liquidation bonus in basis points.
    pub fn liquidation_bonus(&self) -> u16 {
        read(self.0, LIQUIDATION_BONUS_OFFSET, 16) as u16
    }

    pub fn decimals(&self) -> u8 {
        read(self.0, DECIMALS_OFFSET, 8) as u8
    }

    /// Reserve factor in basis points.
    pub fn reserve_factor(&self) -> u16 {
        read(self.0, RESERVE_FACTOR_OFFSET, 16) as u16
    }

    pub fn is_active(&self) -> bool {
        flag(self.0, ACTIVE_BIT)
    }

    pub fn is_frozen(&self) -> bool {
        flag(self.0, FROZEN_BIT)
    }

    pub fn borrowing_enabled(&self) -> bool {
        flag(self.0, BORROWING_BIT)
    }

    pub fn stable_borrowing_enabled(&self) -> bool {
        flag(self.0, STABLE_BORROWING_BIT)
    }

    pub fn with_ltv(self, bps: u16) -> Self {
        Self(write(self.0, LTV_OFFSET, 16, bps as u64))
    }

    pub fn with_liquidation_threshold(self, bps: u16) -> Self {
        Self(write(self.0, LIQUIDATION_THRESHOLD_OFFSET, 16, bps as u64))
    }

    pub fn with_liquidation_bonus(self, bps: u16) -> Self {
        Self(write(self.0, LIQUIDATION_BONUS_OFFSET, 16, bps as u64))
    }

    pub fn with_decimals(self, decimals: u8) -> Self {
        Self(write(self.0, DECIMALS_OFFSET, 8, decimals as u64))
    }

    pub fn with_reserve_factor(self, bps: u16) -> Self {
        Self(write(self.0, RESERVE_FACTOR_OFFSET, 16, bps as u64))
    }

    pub fn with_active(self, active: bool) -> Self {
        Self(set_flag(self.0, ACTIVE_BIT, active))
    }

    pub fn with_frozen(self, frozen: bool) -> Self {
        Self(set_flag(self.0, FROZEN_BIT, frozen))
    }

    pub fn with_borrowing_enabled(self, enabled: bool) -> Self {
        Self(set_flag(self.0, BORROWING_BIT, enabled))
    }

    pub fn with_stable_borrowing_enabled(self, enabled: bool) -> Self {
        Self(set_flag(self.0, STABLE_BORROWING_BIT, enabled))
    }
}

impl From<U256> for ReserveConfiguration {
    fn from(word: U256) -> Self {
        Self(word)
    }
}

/// NFT pool configuration bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NftConfiguration(U256);

impl NftConfiguration {
    /// Wrap a raw configuration word.
    pub const fn new(word: U256) -> Self {
        Self(word)
    }

    /// The raw word.
    pub fn word(&self) -> U256 {
        self.0
    }

    /// Loan-to-value in basis points.
    pub fn ltv(&self) -> u16 {
        read(self.0, LTV_OFFSET, 16) as u16
    }

    /// Liquidation threshold in basis points.
    pub fn liquidation_threshold(&self) -> u16 {
        read(self.0, LIQUIDATION_THRESHOLD_OFFSET, 16) as u16
    }

    /// Liquidation bonus in basis points.
    pub fn liquidation_bonus(&self) -> u16 {
        read(self.0, LIQUIDATION_BONUS_OFFSET, 16) as u16
    }

    pub fn is_active(&self) -> bool {
        flag(self.0, ACTIVE_BIT)
    }

    pub fn is_frozen(&self) -> bool {
        flag(self.0, FROZEN_BIT)
    }

    /// Redeem window after an auction starts, in hours.
    pub fn redeem_duration(&self) -> u8 {
        read(self.0, REDEEM_DURATION_OFFSET, 8) as u8
    }

    /// Auction length in hours.
    pub fn auction_duration(&self) -> u8 {
        read(self.0, AUCTION_DURATION_OFFSET, 8) as u8
    }

    pub fn redeem_fine(&self) -> u16 {
        read(self.0, REDEEM_FINE_OFFSET, 16) as u16
    }

    pub fn redeem_threshold(&self) -> u16 {
        read(self.0, REDEEM_THRESHOLD_OFFSET, 16) as u16
    }

    pub fn min_bid_fine(&self) -> u16 {
        read(self.0, MIN_BID_FINE_OFFSET, 16) as u16
    }

    pub fn with_ltv(self, bps: u16) -> Self {
        Self(write(self.0, LTV_OFFSET, 16, bps as u64))
    }

    pub fn with_liquidation_threshold(self, bps: u16) -> Self {
        Self(write(self.0, LIQUIDATION_THRESHOLD_OFFSET, 16, bps as u64))
    }

    pub fn with_liquidation_bonus(self, bps: u16) -> Self {
        Self(write(self.0, LIQUIDATION_BONUS_OFFSET, 16, bps as u64))
    }

    pub fn with_active(self, active: bool) -> Self {
        Self(set_flag(self.0, ACTIVE_BIT, active))
    }

    pub fn with_frozen(self, frozen: bool) -> Self {
        Self(set_flag(self.0, FROZEN_BIT, frozen))
    }

    pub fn with_redeem_duration(self, hours: u8) -> Self {
        Self(write(self.0, REDEEM_DURATION_OFFSET, 8, hours as u64))
    }

    pub fn with_auction_duration(self, hours: u8) -> Self {
        Self(write(self.0, AUCTION_DURATION_OFFSET, 8, hours as u64))
    }

    pub fn with_redeem_fine(self, bps: u16) -> Self {
        Self(write(self.0, REDEEM_FINE_OFFSET, 16, bps as u64))
    }

    pub fn with_redeem_threshold(self, bps: u16) -> Self {
        Self(write(self.0, REDEEM_THRESHOLD_OFFSET, 16, bps as u64))
    }

    pub fn with_min_bid_fine(self, bps: u16) -> Self {
        Self(write(self.0, MIN_BID_FINE_OFFSET, 16, bps as u64))
    }
}

impl From<U256> for NftConfiguration {
    fn from(word: U256) -> Self {
        Self(word)
    }
}
