/// A simple trait for reading the LDR value.
pub trait OneShot {
    /// Run one blocking conversion and return the raw reading.
    fn read_raw(&mut self) -> u16;
}

impl<T: OneShot + ?Sized> OneShot for &mut T {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

/// Light-dependent resistor behind an ADC driver.
pub struct Ldr<D> {
    driver: D,
    full_scale: u16,
}

impl<D: OneShot> Ldr<D> {
    /// `full_scale` is the raw reading that counts as 100 % light.
    /// A zero full scale is bumped to one.
    pub fn new(driver: D, full_scale: u16) -> Self {
        Self {
            driver,
            full_scale: full_scale.max(1),
        }
    }

    pub fn read_raw(&mut self) -> u16 {
        self.driver.read_raw()
    }

    /// Light level in percent of full scale, saturating at 100.
    pub fn read_level(&mut self) -> u8 {
        let raw = self.read_raw();
        self.level(raw)
    }

    /// Level of a reading already taken.
    pub fn level(&self, raw: u16) -> u8 {
        level_of(raw, self.full_scale)
    }

    pub fn full_scale(&self) -> u16 {
        self.full_scale
    }
}

fn level_of(raw: u16, full_scale: u16) -> u8 {
    let pct = u32::from(raw) * 100 / u32::from(full_scale.max(1));
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAdc;

    #[test]
    fn level_scales_to_percent() {
        let adc = MockAdc::new(0);
        let mut ldr = Ldr::new(adc.clone(), 4095);
        assert_eq!(ldr.read_level(), 0);

        adc.value.set(4095);
        assert_eq!(ldr.read_level(), 100);

        adc.value.set(2048);
        assert_eq!(ldr.read_level(), 50);
        assert_eq!(ldr.level(1024), 25);
    }

    #[test]
    fn readings_above_full_scale_saturate() {
        let mut ldr = Ldr::new(MockAdc::new(1023), 1000);
        assert_eq!(ldr.read_raw(), 1023);
        assert_eq!(ldr.read_level(), 100);
    }

    #[test]
    fn zero_full_scale_does_not_divide_by_zero() {
        let mut ldr = Ldr::new(MockAdc::new(0), 0);
        assert_eq!(ldr.full_scale(), 1);
        assert_eq!(ldr.read_level(), 0);
    }
}
