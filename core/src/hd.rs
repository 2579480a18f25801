// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP-32 hierarchical deterministic nodes
//!
//! Only the pieces the signing engine needs: master-node construction from a
//! seed and private child derivation along a path. Nodes hold private key
//! material and are zeroized on drop; callers must not let copies of the
//! private key outlive the signing step that needed them.

use hmac::{Hmac, Mac};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha512 = Hmac<Sha512>;

/// Hardened-derivation marker bit
pub const HARDENED: u32 = 0x8000_0000;

/// One node of a BIP-32 key tree
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HdNode {
    chain_code: [u8; 32],
    private_key: [u8; 32],
    public_key: [u8; 33],
}

impl HdNode {
    /// Build the master node from a seed (BIP-32 "Bitcoin seed" HMAC)
    pub fn from_seed(secp: &Secp256k1<All>, seed: &[u8]) -> Option<Self> {
        let mut mac = HmacSha512::new_from_slice(b"Bitcoin seed").ok()?;
        mac.update(seed);

        let mut i = [0u8; 64];
        i.copy_from_slice(&mac.finalize().into_bytes());

        let node = Self::from_parts(secp, &i);
        i.zeroize();

        node
    }

    /// Assemble a node from a 64-byte HMAC output (key ‖ chain code)
    fn from_parts(secp: &Secp256k1<All>, i: &[u8; 64]) -> Option<Self> {
        let sk = SecretKey::from_slice(&i[..32]).ok()?;
        let pk = PublicKey::from_secret_key(secp, &sk);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        Some(Self {
            chain_code,
            private_key: sk.secret_bytes(),
            public_key: pk.serialize(),
        })
    }

    /// Derive a private child node (CKDpriv), hardened when `index` carries
    /// the [HARDENED] bit
    pub fn child(&self, secp: &Secp256k1<All>, index: u32) -> Option<Self> {
        let mut data = [0u8; 37];
        if index & HARDENED != 0 {
            data[1..33].copy_from_slice(&self.private_key);
        } else {
            data[..33].copy_from_slice(&self.public_key);
        }
        data[33..].copy_from_slice(&index.to_be_bytes());

        let mut mac = HmacSha512::new_from_slice(&self.chain_code).ok()?;
        mac.update(&data);
        data.zeroize();

        let mut i = [0u8; 64];
        i.copy_from_slice(&mac.finalize().into_bytes());

        let node = self.child_from_hmac(secp, &i);
        i.zeroize();

        node
    }

    fn child_from_hmac(&self, secp: &Secp256k1<All>, i: &[u8; 64]) -> Option<Self> {
        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);

        let tweak = Scalar::from_be_bytes(il).ok()?;
        il.zeroize();

        let parent = SecretKey::from_slice(&self.private_key).ok()?;
        let child = parent.add_tweak(&tweak).ok()?;
        let pk = PublicKey::from_secret_key(secp, &child);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        Some(Self {
            chain_code,
            private_key: child.secret_bytes(),
            public_key: pk.serialize(),
        })
    }

    /// Derive along a full path, one child at a time
    pub fn derive(&self, secp: &Secp256k1<All>, path: &[u32]) -> Option<Self> {
        let mut node = self.clone();
        for index in path {
            node = node.child(secp, *index)?;
        }
        Some(node)
    }

    /// Raw private key bytes
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    /// Compressed public key bytes
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // BIP-32 test vector 1
    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn master_from_seed() {
        let secp = Secp256k1::new();
        let seed = hex::decode(SEED).unwrap();

        let node = HdNode::from_seed(&secp, &seed).unwrap();

        assert_eq!(
            hex::encode(node.private_key()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(node.chain_code),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(
            hex::encode(node.public_key()),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );
    }

    #[test]
    fn hardened_child() {
        let secp = Secp256k1::new();
        let seed = hex::decode(SEED).unwrap();

        let node = HdNode::from_seed(&secp, &seed).unwrap();
        let child = node.derive(&secp, &[HARDENED]).unwrap();

        // m/0' of test vector 1
        assert_eq!(
            hex::encode(child.private_key()),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(child.chain_code),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
    }

    #[test]
    fn path_derivation_matches_stepwise() {
        let secp = Secp256k1::new();
        let seed = hex::decode(SEED).unwrap();

        let node = HdNode::from_seed(&secp, &seed).unwrap();

        let stepwise = node
            .child(&secp, HARDENED | 44)
            .and_then(|n| n.child(&secp, 0))
            .and_then(|n| n.child(&secp, 7))
            .unwrap();
        let direct = node.derive(&secp, &[HARDENED | 44, 0, 7]).unwrap();

        assert_eq!(stepwise.private_key(), direct.private_key());
        assert_eq!(stepwise.public_key(), direct.public_key());
    }
}
