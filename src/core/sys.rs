// Raw ABI of the nrfjprog library (nrfjprogdll.h).
#![allow(non_camel_case_types)]
use std::os::raw::{c_char, c_int};

/// `nrfjprogdll_err_t`
pub type nrfjprogdll_err_t = c_int;

// C enums cross the boundary as plain ints; unknown values must not become Rust enums.
pub type device_family_t = c_int;
pub type device_version_t = c_int;
pub type readback_protection_status_t = c_int;
pub type region_0_source_t = c_int;
pub type ram_section_power_status_t = c_int;
pub type cpu_registers_t = c_int;
pub type rtt_direction_t = c_int;
pub type qspi_erase_len_t = c_int;

pub type msg_callback = unsafe extern "C" fn(msg_str: *const c_char);

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QspiInitParams {
    pub read_mode: c_int,
    pub write_mode: c_int,
    pub address_mode: c_int,
    pub frequency: c_int,
    pub spi_mode: c_int,
    pub sck_delay: u32,
    pub custom_instruction_io2_level: c_int,
    pub custom_instruction_io3_level: c_int,
    pub csn_pin: u32,
    pub csn_port: u32,
    pub sck_pin: u32,
    pub sck_port: u32,
    pub dio0_pin: u32,
    pub dio0_port: u32,
    pub dio1_pin: u32,
    pub dio1_port: u32,
    pub dio2_pin: u32,
    pub dio2_port: u32,
    pub dio3_pin: u32,
    pub dio3_port: u32,
    pub wip_index: u32,
    pub pp_size: c_int,
}

pub const SUCCESS: nrfjprogdll_err_t = 0;
pub const OUT_OF_MEMORY: nrfjprogdll_err_t = -1;
pub const INVALID_OPERATION: nrfjprogdll_err_t = -2;
pub const INVALID_PARAMETER: nrfjprogdll_err_t = -3;
pub const INVALID_DEVICE_FOR_OPERATION: nrfjprogdll_err_t = -4;
pub const WRONG_FAMILY_FOR_DEVICE: nrfjprogdll_err_t = -5;
pub const EMULATOR_NOT_CONNECTED: nrfjprogdll_err_t = -10;
pub const CANNOT_CONNECT: nrfjprogdll_err_t = -11;
pub const LOW_VOLTAGE: nrfjprogdll_err_t = -12;
pub const NO_EMULATOR_CONNECTED: nrfjprogdll_err_t = -13;
pub const NVMC_ERROR: nrfjprogdll_err_t = -20;
pub const RECOVER_FAILED: nrfjprogdll_err_t = -21;
pub const NOT_AVAILABLE_BECAUSE_PROTECTION: nrfjprogdll_err_t = -90;
pub const NOT_AVAILABLE_BECAUSE_MPU_CONFIG: nrfjprogdll_err_t = -91;
pub const JLINKARM_DLL_NOT_FOUND: nrfjprogdll_err_t = -100;
pub const JLINKARM_DLL_COULD_NOT_BE_OPENED: nrfjprogdll_err_t = -101;
pub const JLINKARM_DLL_ERROR: nrfjprogdll_err_t = -102;
pub const JLINKARM_DLL_TOO_OLD: nrfjprogdll_err_t = -103;
pub const NRFJPROG_SUB_DLL_NOT_FOUND: nrfjprogdll_err_t = -150;
pub const NRFJPROG_SUB_DLL_COULD_NOT_BE_OPENED: nrfjprogdll_err_t = -151;
pub const NOT_IMPLEMENTED_ERROR: nrfjprogdll_err_t = -255;

/// Name of a documented status code, `None` for values the header does not list.
pub fn status_name(status: nrfjprogdll_err_t) -> Option<&'static str> {
    let name = match status {
        SUCCESS => "SUCCESS",
        OUT_OF_MEMORY => "OUT_OF_MEMORY",
        INVALID_OPERATION => "INVALID_OPERATION",
        INVALID_PARAMETER => "INVALID_PARAMETER",
        INVALID_DEVICE_FOR_OPERATION => "INVALID_DEVICE_FOR_OPERATION",
        WRONG_FAMILY_FOR_DEVICE => "WRONG_FAMILY_FOR_DEVICE",
        EMULATOR_NOT_CONNECTED => "EMULATOR_NOT_CONNECTED",
        CANNOT_CONNECT => "CANNOT_CONNECT",
        LOW_VOLTAGE => "LOW_VOLTAGE",
        NO_EMULATOR_CONNECTED => "NO_EMULATOR_CONNECTED",
        NVMC_ERROR => "NVMC_ERROR",
        RECOVER_FAILED => "RECOVER_FAILED",
        NOT_AVAILABLE_BECAUSE_PROTECTION => "NOT_AVAILABLE_BECAUSE_PROTECTION",
        NOT_AVAILABLE_BECAUSE_MPU_CONFIG => "NOT_AVAILABLE_BECAUSE_MPU_CONFIG",
        JLINKARM_DLL_NOT_FOUND => "JLINKARM_DLL_NOT_FOUND",
        JLINKARM_DLL_COULD_NOT_BE_OPENED => "JLINKARM_DLL_COULD_NOT_BE_OPENED",
        JLINKARM_DLL_ERROR => "JLINKARM_DLL_ERROR",
        JLINKARM_DLL_TOO_OLD => "JLINKARM_DLL_TOO_OLD",
        NRFJPROG_SUB_DLL_NOT_FOUND => "NRFJPROG_SUB_DLL_NOT_FOUND",
        NRFJPROG_SUB_DLL_COULD_NOT_BE_OPENED => "NRFJPROG_SUB_DLL_COULD_NOT_BE_OPENED",
        NOT_IMPLEMENTED_ERROR => "NOT_IMPLEMENTED_ERROR",
        _ => return None,
    };
    Some(name)
}

pub type DllVersionFn =
    unsafe extern "C" fn(major: *mut u32, minor: *mut u32, revision: *mut c_char) -> nrfjprogdll_err_t;
pub type IsDllOpenFn = unsafe extern "C" fn(opened: *mut bool) -> nrfjprogdll_err_t;
pub type OpenDllFn = unsafe extern "C" fn(
    jlink_path: *const c_char,
    cb: Option<msg_callback>,
    family: device_family_t,
) -> nrfjprogdll_err_t;
pub type CloseDllFn = unsafe extern "C" fn();
pub type EnumEmuSnrFn = unsafe extern "C" fn(
    serial_numbers: *mut u32,
    serial_numbers_len: u32,
    num_available: *mut u32,
) -> nrfjprogdll_err_t;
pub type IsConnectedToEmuFn = unsafe extern "C" fn(is_connected: *mut bool) -> nrfjprogdll_err_t;
pub type ConnectToEmuWithSnrFn =
    unsafe extern "C" fn(serial_number: u32, clock_speed_in_khz: u32) -> nrfjprogdll_err_t;
pub type ConnectToEmuWithoutSnrFn =
    unsafe extern "C" fn(clock_speed_in_khz: u32) -> nrfjprogdll_err_t;
pub type ReadConnectedEmuSnrFn = unsafe extern "C" fn(serial_number: *mut u32) -> nrfjprogdll_err_t;
pub type ReadConnectedEmuFwstrFn =
    unsafe extern "C" fn(buffer: *mut c_char, buffer_size: u32) -> nrfjprogdll_err_t;
pub type VoidCallFn = unsafe extern "C" fn() -> nrfjprogdll_err_t;
pub type IsConnectedToDeviceFn = unsafe extern "C" fn(is_connected: *mut bool) -> nrfjprogdll_err_t;
pub type ReadbackProtectFn =
    unsafe extern "C" fn(desired_protection: readback_protection_status_t) -> nrfjprogdll_err_t;
pub type ReadbackStatusFn =
    unsafe extern "C" fn(status: *mut readback_protection_status_t) -> nrfjprogdll_err_t;
pub type ReadRegion0SizeAndSourceFn =
    unsafe extern "C" fn(size: *mut u32, source: *mut region_0_source_t) -> nrfjprogdll_err_t;
pub type EraseAddrFn = unsafe extern "C" fn(addr: u32) -> nrfjprogdll_err_t;
pub type WriteU32Fn =
    unsafe extern "C" fn(addr: u32, data: u32, nvmc_control: bool) -> nrfjprogdll_err_t;
pub type ReadU32Fn = unsafe extern "C" fn(addr: u32, data: *mut u32) -> nrfjprogdll_err_t;
pub type WriteFn = unsafe extern "C" fn(
    addr: u32,
    data: *const u8,
    data_len: u32,
    nvmc_control: bool,
) -> nrfjprogdll_err_t;
pub type ReadFn = unsafe extern "C" fn(addr: u32, data: *mut u8, data_len: u32) -> nrfjprogdll_err_t;
pub type IsHaltedFn = unsafe extern "C" fn(is_halted: *mut bool) -> nrfjprogdll_err_t;
pub type RunFn = unsafe extern "C" fn(pc: u32, sp: u32) -> nrfjprogdll_err_t;
pub type ReadRamSectionsCountFn = unsafe extern "C" fn(count: *mut u32) -> nrfjprogdll_err_t;
pub type ReadRamSectionsSizeFn =
    unsafe extern "C" fn(sizes: *mut u32, sizes_len: u32) -> nrfjprogdll_err_t;
pub type ReadRamSectionsPowerStatusFn = unsafe extern "C" fn(
    power_status: *mut ram_section_power_status_t,
    power_status_len: u32,
) -> nrfjprogdll_err_t;
pub type IsRamPoweredFn = unsafe extern "C" fn(
    power_status: *mut ram_section_power_status_t,
    power_status_array_size: u32,
    sections_number: *mut u32,
    sections_size: *mut u32,
) -> nrfjprogdll_err_t;
pub type UnpowerRamSectionFn = unsafe extern "C" fn(section_index: u32) -> nrfjprogdll_err_t;
pub type ReadCpuRegisterFn =
    unsafe extern "C" fn(register_name: cpu_registers_t, value: *mut u32) -> nrfjprogdll_err_t;
pub type WriteCpuRegisterFn =
    unsafe extern "C" fn(register_name: cpu_registers_t, value: u32) -> nrfjprogdll_err_t;
pub type ReadDeviceVersionFn =
    unsafe extern "C" fn(version: *mut device_version_t) -> nrfjprogdll_err_t;
pub type ReadDeviceFamilyFn =
    unsafe extern "C" fn(family: *mut device_family_t) -> nrfjprogdll_err_t;
pub type ReadDebugPortRegisterFn =
    unsafe extern "C" fn(reg_addr: u8, data: *mut u32) -> nrfjprogdll_err_t;
pub type WriteDebugPortRegisterFn = unsafe extern "C" fn(reg_addr: u8, data: u32) -> nrfjprogdll_err_t;
pub type ReadAccessPortRegisterFn =
    unsafe extern "C" fn(ap_index: u8, reg_addr: u8, data: *mut u32) -> nrfjprogdll_err_t;
pub type WriteAccessPortRegisterFn =
    unsafe extern "C" fn(ap_index: u8, reg_addr: u8, data: u32) -> nrfjprogdll_err_t;
pub type IsRttStartedFn = unsafe extern "C" fn(started: *mut bool) -> nrfjprogdll_err_t;
pub type RttSetControlBlockAddressFn = unsafe extern "C" fn(address: u32) -> nrfjprogdll_err_t;
pub type RttIsControlBlockFoundFn = unsafe extern "C" fn(found: *mut bool) -> nrfjprogdll_err_t;
pub type RttReadFn = unsafe extern "C" fn(
    up_channel_index: u32,
    data: *mut c_char,
    data_len: u32,
    data_read: *mut u32,
) -> nrfjprogdll_err_t;
pub type RttWriteFn = unsafe extern "C" fn(
    down_channel_index: u32,
    data: *const c_char,
    data_len: u32,
    data_written: *mut u32,
) -> nrfjprogdll_err_t;
pub type RttReadChannelCountFn =
    unsafe extern "C" fn(down_channel_number: *mut u32, up_channel_number: *mut u32) -> nrfjprogdll_err_t;
pub type RttReadChannelInfoFn = unsafe extern "C" fn(
    channel_index: u32,
    dir: rtt_direction_t,
    channel_name: *mut c_char,
    channel_name_len: u32,
    channel_size: *mut u32,
) -> nrfjprogdll_err_t;
pub type IsQspiInitFn = unsafe extern "C" fn(initialized: *mut bool) -> nrfjprogdll_err_t;
pub type QspiInitFn =
    unsafe extern "C" fn(retain_ram: bool, init_params: *const QspiInitParams) -> nrfjprogdll_err_t;
pub type QspiReadFn =
    unsafe extern "C" fn(addr: u32, data: *mut u8, data_len: u32) -> nrfjprogdll_err_t;
pub type QspiWriteFn =
    unsafe extern "C" fn(addr: u32, data: *const u8, data_len: u32) -> nrfjprogdll_err_t;
pub type QspiEraseFn = unsafe extern "C" fn(addr: u32, length: qspi_erase_len_t) -> nrfjprogdll_err_t;
pub type QspiCustomFn = unsafe extern "C" fn(
    instruction_code: u8,
    instruction_length: u32,
    data_in: *const u8,
    data_out: *mut u8,
) -> nrfjprogdll_err_t;

#[cfg(test)]
mod tests {
    use super::{QspiInitParams, status_name};
    use std::mem::size_of;

    #[test]
    fn documented_statuses_have_names() {
        assert_eq!(status_name(0), Some("SUCCESS"));
        assert_eq!(status_name(-13), Some("NO_EMULATOR_CONNECTED"));
        assert_eq!(status_name(-100), Some("JLINKARM_DLL_NOT_FOUND"));
        assert_eq!(status_name(-255), Some("NOT_IMPLEMENTED_ERROR"));
        assert_eq!(status_name(-7), None);
    }

    #[test]
    fn qspi_params_are_packed_as_32_bit_fields() {
        assert_eq!(size_of::<QspiInitParams>(), 22 * 4);
    }
}
