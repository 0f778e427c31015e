//! Common types and constants

use num_bigint::BigUint;

use crate::crypto::curve::{Curve, Point};

/// Character set for key encoding (base-24)
pub const KCHARS: &str = "BCDFGHJKMPQRTVWXY2346789";

/// Which of the two fixed parameter sets a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// License Server ID (SPK), derived solely from the product identifier.
    Server,
    /// License Key Pack (LKP), parameterized by count, version and channel.
    KeyPack,
}

/// A named curve instance: the curve itself plus generator, group order,
/// public point and signing scalar. All values are immutable; instances are
/// passed into every operation rather than held as process-wide globals.
#[derive(Debug, Clone)]
pub struct CurveParameters {
    pub kind: KeyKind,
    pub curve: Curve,
    pub g: Point,
    pub n: BigUint,
    pub k: Point,
    pub private_key: BigUint,
}

impl CurveParameters {
    /// Parameters for License Server IDs.
    pub fn server() -> Self {
        Self {
            kind: KeyKind::Server,
            curve: Curve::new(
                dec("21782971228112002125810473336838725345308036616026120243639513697227789232461459408261967852943809534324870610618161"),
                BigUint::from(1u32),
            ),
            g: Point::new(
                dec("10692194187797070010417373067833672857716423048889432566885309624149667762706899929433420143814127803064297378514651"),
                dec("14587399915883137990539191966406864676102477026583239850923355829082059124877792299572208431243410905713755917185109"),
            ),
            n: dec("629063109922370885449"),
            k: Point::new(
                dec("3917395608307488535457389605368226854270150445881753750395461980792533894109091921400661704941484971683063487980768"),
                dec("8858262671783403684463979458475735219807686373661776500155868309933327116988404547349319879900761946444470688332645"),
            ),
            private_key: dec("153862071918555979944"),
        }
    }

    /// Parameters for License Key Packs.
    pub fn key_pack() -> Self {
        Self {
            kind: KeyKind::KeyPack,
            curve: Curve::new(
                dec("28688293616765795404141427476803815352899912533728694325464374376776313457785622361119232589082131818578591461837297"),
                BigUint::from(1u32),
            ),
            g: Point::new(
                dec("18999816458520350299014628291870504329073391058325678653840191278128672378485029664052827205905352913351648904170809"),
                dec("7233699725243644729688547165924232430035643592445942846958231777803539836627943189850381859836033366776176689124317"),
            ),
            n: dec("675048016158598417213"),
            k: Point::new(
                dec("7147768390112741602848314103078506234267895391544114241891627778383312460777957307647946308927283757886117119137500"),
                dec("20525272195909974311677173484301099561025532568381820845650748498800315498040161314197178524020516408371544778243934"),
            ),
            private_key: dec("100266970209474387075"),
        }
    }

    /// Parameters for the given key kind.
    pub fn for_kind(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Server => Self::server(),
            KeyKind::KeyPack => Self::key_pack(),
        }
    }
}

fn dec(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
}
