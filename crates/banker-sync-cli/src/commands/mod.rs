pub mod gold;
pub mod loan;
pub mod payment;
pub mod validate;

use banker_sync_core::types::RepaymentType;
use clap::ValueEnum;

/// CLI-facing repayment scheme selector.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RepaymentArg {
    /// Equal monthly installments
    #[default]
    Emi,
    /// Single lump sum at term end
    Bullet,
}

impl From<RepaymentArg> for RepaymentType {
    fn from(arg: RepaymentArg) -> Self {
        match arg {
            RepaymentArg::Emi => RepaymentType::EmiScheme,
            RepaymentArg::Bullet => RepaymentType::BulletPayment,
        }
    }
}
