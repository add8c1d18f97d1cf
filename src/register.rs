//! ADF4350 registers

use core::marker::PhantomData;

/// Register number marker types
macro_rules! gen_register_marker {
    ($r:ident, $n:tt) => {
        /// Register marker
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $r {}

        impl Default for Reg<$r> { #[inline] fn default() -> Self { Reg { w: $n, phantom: PhantomData } } }
    }
}

gen_register_marker!(R0, 0);
gen_register_marker!(R1, 1);
gen_register_marker!(R2, 2);
gen_register_marker!(R3, 3);
gen_register_marker!(R4, 4);
gen_register_marker!(R5, 5);


/// Number of control registers
pub const NUM_REGISTERS: usize = 6;

/// Mask of the three control bits (C3, C2, C1) selecting the destination latch
pub const ADDRESS_MASK: u32 = 0b111;

/// Register address encoded in the control bits of a device word.
#[inline]
pub const fn address(w: u32) -> u8 {
    (w & ADDRESS_MASK) as u8
}


/// Single config register.
/// A default register holds only its address in the control bits.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Reg<R> {
    /// Config register word
    pub w: u32,
    phantom: PhantomData<R>,
}

/// Bit operations on 32bit words
impl<R> Reg<R> {
    #[inline]
    pub fn get<F>(&self) -> F
    where F: BitField<R> + From<u32>
    {
        F::from(self.bits::<F>())
    }

    /// Raw bits of a field, right aligned
    #[inline]
    pub fn bits<F>(&self) -> u32
    where F: BitField<R>
    {
        (self.w >> F::offset()) & F::mask()
    }

    #[inline]
    pub fn set<F>(mut self, f: F) -> Self
    where F: BitField<R> + Into<u32>
    {
        let fbits = (f.into() & F::mask()) << F::offset();
        let rbits = self.w & !(F::mask() << F::offset());
        self.w = rbits | fbits;
        self
    }

    /// Address from the control bits
    #[inline]
    pub fn address(&self) -> u8 {
        address(self.w)
    }
}



/// Full set of config registers.
///
/// When power is first applied to the ADF4350, the part requires
/// six writes (one each to R5, R4, R3, R2, R1, and R0) for the output
/// to become active.
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
pub struct RegisterSet {
    pub r0: Reg<R0>,
    pub r1: Reg<R1>,
    pub r2: Reg<R2>,
    pub r3: Reg<R3>,
    pub r4: Reg<R4>,
    pub r5: Reg<R5>,
}

/// Type-indexed register access
pub trait RIdx<R> {
    fn r(&self) -> Reg<R>;
    fn update_r<F>(self, f: F) -> Self where F: FnOnce(Reg<R>) -> Reg<R>;
}

macro_rules! gen_register_index {
    ($r:ident, $f:tt) => {
        impl RIdx<$r> for RegisterSet {
            #[inline]
            fn r(&self) -> Reg<$r> { self.$f }
            #[inline]
            fn update_r<F>(mut self, f: F) -> Self where F: FnOnce(Reg<$r>) -> Reg<$r> {
                self.$f = f(self.$f);
                self
            }
        }
    }
}

gen_register_index!(R0, r0);
gen_register_index!(R1, r1);
gen_register_index!(R2, r2);
gen_register_index!(R3, r3);
gen_register_index!(R4, r4);
gen_register_index!(R5, r5);


impl RegisterSet {

    /// Register values in device format, indexed by address.
    #[inline]
    pub fn to_words(&self) -> [u32; NUM_REGISTERS] {
        [self.r0.w, self.r1.w, self.r2.w, self.r3.w, self.r4.w, self.r5.w]
    }

    /// Get register bitfield value
    #[inline]
    pub fn get<F,R>(&self) -> F
    where F: BitField<R> + From<u32>,
          Self: RIdx<R>
    {
        self.r().get()
    }

    /// Raw register bitfield bits
    #[inline]
    pub fn bits<F,R>(&self) -> u32
    where F: BitField<R>,
          Self: RIdx<R>
    {
        self.r().bits::<F>()
    }

    /// Update register bitfield
    #[inline]
    pub fn set<F,R>(self, f: F) -> Self
    where F: BitField<R> + Into<u32>,
          Self: RIdx<R>
    {
        self.update_r(|r| r.set(f))
    }
}



/// Bit operations on 32bit words
pub trait BitField<R> {
    /// Number of bits in the bit field
    fn num_bits() -> u8;

    /// Offset from 0
    fn offset() -> u8;

    #[inline]
    fn mask() -> u32 {
        !(0xFFFF_FFFFu32 << Self::num_bits())
    }
}

/// Generate BitField implementation
macro_rules! gen_bitfield_impl {
    ($r:ty, $n:ident, $nb:tt, $off:tt) => {
        impl BitField<$r> for $n {
            #[inline] fn num_bits() -> u8 { $nb }
            #[inline] fn offset() -> u8 { $off }
        }
    }
}

/// Small bitfield-encoded numbers boilerplate
macro_rules! gen_bitfield_struct {
    ($(#[$meta:meta])*, $r:ty, $n:ident, $v:ty, $nb:tt, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $n(pub $v);

        gen_bitfield_impl!($r, $n, $nb, $off);

        impl From<u32> for $n { #[inline] fn from(x: u32) -> Self { $n(x as $v) } }
        impl From<$n> for u32 { #[inline] fn from(x: $n) -> u32 { x.0 as u32 } }
    };
}

/// Enum bitfields encode their discriminant.
/// Listing every variant in bit order (one per code) also makes them decodable.
macro_rules! gen_bitfield_enum {
    ($r:ty, $n:ident, $nb:tt, $off:tt) => {
        gen_bitfield_impl!($r, $n, $nb, $off);

        impl From<$n> for u32 { #[inline] fn from(x: $n) -> u32 { x as u32 } }
    };
    ($r:ty, $n:ident, $nb:tt, $off:tt, [$($v:ident),+]) => {
        gen_bitfield_enum!($r, $n, $nb, $off);

        impl From<u32> for $n {
            #[inline]
            fn from(x: u32) -> Self {
                const CODES: [$n; 1 << $nb] = [$($n::$v),+];
                CODES[(x & <$n as BitField<$r>>::mask()) as usize]
            }
        }
    };
}


gen_bitfield_struct!(
    /// 16-Bit Integer Value (INT)
    /// Bits[DB30:DB15] set the integer part of the feedback division
    /// factor. Values from 23 to 65,535 are allowed for the 4/5 prescaler,
    /// the 8/9 prescaler needs at least 75.
    , R0, Int, u16, 16, 15
);

gen_bitfield_struct!(
    /// 12-Bit Fractional Value (FRAC)
    /// Bits[DB14:DB3] set the numerator of the fraction fed to the Σ-Δ
    /// modulator. FRAC values from 0 to (MOD − 1) cover channels over
    /// a frequency range equal to the PFD reference frequency.
    , R0, Frac, u16, 12, 3
);


/// The dual-modulus prescaler (P/P + 1), along with INT, FRAC and MOD,
/// sets the overall division ratio from the VCO output to the PFD input.
/// Above 3 GHz the prescaler must be 8/9.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Pr1Prescaler {
    /// Prescaler = 4/5: INT N MIN = 23
    Pr45,
    /// Prescaler = 8/9: INT N MIN = 75
    Pr89,
}
gen_bitfield_enum!(R1, Pr1Prescaler, 1, 27, [Pr45, Pr89]);

gen_bitfield_struct!(
    /// 12-Bit Phase Value
    /// Bits[DB26:DB15] control the phase word. The phase word must be
    /// less than the MOD value programmed in Register 1.
    , R1, Phase, u16, 12, 15
);

gen_bitfield_struct!(
    /// 12-Bit Modulus Value (MOD)
    /// Bits[DB14:DB3] set the fractional modulus, the ratio of the PFD
    /// frequency to the channel step resolution on the RF output.
    , R1, Mod, u16, 12, 3
);


/// Bits[DB30:DB29] trade spurious performance against phase noise.
/// Low spur mode enables dither, low noise mode disables it.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum NoiseMode {
    LowNoise,
    LowSpur = 0b11,
}
gen_bitfield_enum!(R2, NoiseMode, 2, 29);


/// The on-chip multiplexer, Bits[DB28:DB26].
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Muxout {
    ThreeStateOut,
    Dvdd,
    Dgnd,
    RCntOut,
    NDivOut,
    Alock,
    Dlock,
}
gen_bitfield_enum!(R2, Muxout, 3, 26);

gen_bitfield_struct!(
    /// The 10-bit R counter (Bits[DB23:DB14]) divides REF IN down to the
    /// PFD reference clock. Division ratios from 1 to 1023 are allowed.
    , R2, R, u16, 10, 14
);

gen_bitfield_struct!(
    /// Charge Pump Current Setting
    /// Bits[DB12:DB9] should match the current the loop filter is
    /// designed with.
    , R2, ChargePumpCurrent, u8, 4, 9
);

/// The DB6 bit sets the phase detector polarity. Positive for a passive
/// or noninverting active loop filter.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PhaseDetectorPolarity {
    Negative,
    Positive,
}
gen_bitfield_enum!(R2, PhaseDetectorPolarity, 1, 6, [Negative, Positive]);

/// The DB5 bit provides the programmable power-down mode.
/// In software power-down the part keeps its register contents, the
/// VCO is powered down and the RF OUT buffers are disabled.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PowerDown {
    Disabled,
    Enabled,
}
gen_bitfield_enum!(R2, PowerDown, 1, 5, [Disabled, Enabled]);

impl From<bool> for PowerDown {
    #[inline]
    fn from(pd: bool) -> Self {
        if pd { PowerDown::Enabled } else { PowerDown::Disabled }
    }
}


gen_bitfield_struct!(
    /// 12-Bit Clock Divider Value
    /// Bits[DB14:DB3], the timeout counter for phase resync and fast lock.
    , R3, ClockDividerValue, u16, 12, 3
);


/// The DB23 bit selects the feedback from the VCO output to the
/// N counter: directly from the VCO (fundamental) or from the output
/// of the output dividers (divided).
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum FeedbackSelect {
    Divided,
    Fundamental,
}
gen_bitfield_enum!(R4, FeedbackSelect, 1, 23, [Divided, Fundamental]);

impl From<bool> for FeedbackSelect {
    #[inline]
    fn from(fundamental: bool) -> Self {
        if fundamental { FeedbackSelect::Fundamental } else { FeedbackSelect::Divided }
    }
}

gen_bitfield_struct!(
    /// RF Divider Select
    /// Bits[DB22:DB20], the RF output divider as a power of two.
    , R4, RfDividerSelect, u8, 3, 20
);

gen_bitfield_struct!(
    /// Band Select Clock Divider Value
    /// Bits[DB19:DB12] divide the R counter output down to clock the
    /// band select logic (must end up at or below 125 kHz).
    , R4, BandSelectClockDiv, u8, 8, 12
);

/// The DB8 bit enables or disables the auxiliary RF output.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum AuxOutputEnable {
    Disabled,
    Enabled,
}
gen_bitfield_enum!(R4, AuxOutputEnable, 1, 8, [Disabled, Enabled]);

impl From<bool> for AuxOutputEnable {
    #[inline]
    fn from(en: bool) -> Self {
        if en { AuxOutputEnable::Enabled } else { AuxOutputEnable::Disabled }
    }
}

gen_bitfield_struct!(
    /// AUX Output Power
    /// Bits[DB7:DB6]: -4, -1, +2, +5 dBm.
    , R4, AuxOutputPower, u8, 2, 6
);

/// The DB5 bit enables or disables the primary RF output.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum RfOutputEnable {
    Disabled,
    Enabled,
}
gen_bitfield_enum!(R4, RfOutputEnable, 1, 5, [Disabled, Enabled]);

impl From<bool> for RfOutputEnable {
    #[inline]
    fn from(en: bool) -> Self {
        if en { RfOutputEnable::Enabled } else { RfOutputEnable::Disabled }
    }
}

gen_bitfield_struct!(
    /// Output Power
    /// Bits[DB4:DB3]: -4, -1, +2, +5 dBm.
    , R4, OutputPower, u8, 2, 3
);


/// Bits[DB23:DB22] set the operation of the lock detect (LD) pin.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum LockDetectPin {
    Low,
    DigitalLockDetect,
    Low1,
    High,
}
gen_bitfield_enum!(R5, LockDetectPin, 2, 22, [Low, DigitalLockDetect, Low1, High]);

gen_bitfield_struct!(
    /// Bits[DB20:DB19] are reserved and must be set to 11.
    , R5, Reserved19, u8, 2, 19
);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registers_carry_their_address() {
        let words = RegisterSet::default().to_words();
        for (i, w) in words.iter().enumerate() {
            assert_eq!(address(*w) as usize, i);
            assert_eq!(*w, i as u32);
        }
    }

    #[test]
    fn set_replaces_previous_field_bits() {
        let r = Reg::<R0>::default()
            .set(Int(0xFFFF))
            .set(Int(0x0001));
        assert_eq!(r.w, 1 << 15);
        assert_eq!(r.get::<Int>(), Int(1));
    }

    #[test]
    fn set_masks_oversized_values() {
        let r = Reg::<R0>::default().set(Frac(0xF_FFF));
        assert_eq!(r.w, 0xFFF << 3);
        assert_eq!(r.get::<Int>(), Int(0));
    }

    #[test]
    fn set_leaves_neighbouring_fields_alone() {
        let rs = RegisterSet::default()
            .set(AuxOutputPower(3))
            .set(OutputPower(2))
            .set(RfOutputEnable::Enabled);
        assert_eq!(rs.get::<AuxOutputPower, _>(), AuxOutputPower(3));
        assert_eq!(rs.get::<OutputPower, _>(), OutputPower(2));
        assert_eq!(rs.get::<RfOutputEnable, _>(), RfOutputEnable::Enabled);
        assert_eq!(rs.get::<AuxOutputEnable, _>(), AuxOutputEnable::Disabled);
        assert_eq!(rs.r4.w, (3 << 6) | (2 << 3) | (1 << 5) | 4);
    }

    #[test]
    fn enum_fields_decode() {
        let rs = RegisterSet::default()
            .set(LockDetectPin::DigitalLockDetect)
            .set(FeedbackSelect::Fundamental)
            .set(Muxout::Dlock)
            .set(NoiseMode::LowSpur);
        assert_eq!(rs.get::<LockDetectPin, _>(), LockDetectPin::DigitalLockDetect);
        assert_eq!(rs.get::<FeedbackSelect, _>(), FeedbackSelect::Fundamental);
        assert_eq!(rs.bits::<Muxout, _>(), 0b110);
        assert_eq!(rs.bits::<NoiseMode, _>(), 0b11);
    }
}
