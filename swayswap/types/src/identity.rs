use {
    crate::{Addr, ContractId},
    serde::{Deserialize, Serialize},
    std::fmt::{self, Display},
};

/// Either a wallet or a contract, i.e. anything that can own assets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identity {
    Address(Addr),
    ContractId(ContractId),
}

impl Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Identity::Address(addr) => write!(f, "address {addr}"),
            Identity::ContractId(contract) => write!(f, "contract {contract}"),
        }
    }
}
