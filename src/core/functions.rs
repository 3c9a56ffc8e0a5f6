//! Purpose: Typed function table for the nrfjprog entry points and its resolution.
//! Exports: `NrfjprogFunctions`, `SYMBOLS`, `FIELDS`, `SYMBOL_COUNT`.
//! Role: Declarative `(field, exported name, type)` list; resolution walks it in order.
//! Invariants: A table value exists only when every entry point resolved to a non-null address.
//! Invariants: Resolution stops at the first missing symbol; later names are never requested.
use std::ffi::c_void;
use std::mem::{self, size_of};
use std::ptr::NonNull;

use crate::core::error::{Error, ErrorKind};
use crate::core::sys::*;

macro_rules! nrfjprog_functions {
    ($($field:ident => $name:literal : $ty:ty,)*) => {
        /// One callable pointer per exported nrfjprog entry point.
        ///
        /// Pointers are only valid while the library they came from stays loaded;
        /// `NrfjprogLibrary` hands the table out as a borrow to enforce that.
        #[derive(Clone, Copy, Debug)]
        pub struct NrfjprogFunctions {
            $(pub $field: $ty,)*
        }

        /// Exported symbol names in resolution order.
        pub const SYMBOLS: &[&str] = &[$($name,)*];

        /// Table field names, index-aligned with `SYMBOLS`.
        pub const FIELDS: &[&str] = &[$(stringify!($field),)*];

        $(const _: () = assert!(size_of::<$ty>() == size_of::<*const c_void>());)*

        impl NrfjprogFunctions {
            /// Builds a table by asking `lookup` for each symbol in `SYMBOLS` order.
            ///
            /// # Safety
            /// Every non-null address returned by `lookup` must point to a function with
            /// the signature declared for that symbol.
            pub unsafe fn resolve<F>(mut lookup: F) -> Result<Self, Error>
            where
                F: FnMut(&'static str) -> Option<NonNull<c_void>>,
            {
                Ok(Self {
                    $($field: unsafe { resolve_one::<$ty, F>($name, &mut lookup)? },)*
                })
            }

            /// `(exported name, address)` for every field, in `SYMBOLS` order.
            pub fn entries(&self) -> [(&'static str, *const c_void); SYMBOL_COUNT] {
                [$(($name, self.$field as *const c_void),)*]
            }
        }
    };
}

pub const SYMBOL_COUNT: usize = SYMBOLS.len();

unsafe fn resolve_one<T: Copy, F>(name: &'static str, lookup: &mut F) -> Result<T, Error>
where
    F: FnMut(&'static str) -> Option<NonNull<c_void>>,
{
    let address = lookup(name).ok_or_else(|| {
        Error::new(ErrorKind::CouldNotLoadLibrary)
            .with_message("library is missing a required entry point")
            .with_symbol(name)
    })?;
    Ok(unsafe { mem::transmute_copy::<NonNull<c_void>, T>(&address) })
}

nrfjprog_functions! {
    dll_version => "NRFJPROG_dll_version": DllVersionFn,
    is_dll_open => "NRFJPROG_is_dll_open": IsDllOpenFn,
    open_dll => "NRFJPROG_open_dll": OpenDllFn,
    close_dll => "NRFJPROG_close_dll": CloseDllFn,
    enum_emu_snr => "NRFJPROG_enum_emu_snr": EnumEmuSnrFn,
    is_connected_to_emu => "NRFJPROG_is_connected_to_emu": IsConnectedToEmuFn,
    connect_to_emu_with_snr => "NRFJPROG_connect_to_emu_with_snr": ConnectToEmuWithSnrFn,
    connect_to_emu_without_snr => "NRFJPROG_connect_to_emu_without_snr": ConnectToEmuWithoutSnrFn,
    read_connected_emu_snr => "NRFJPROG_read_connected_emu_snr": ReadConnectedEmuSnrFn,
    read_connected_emu_fwstr => "NRFJPROG_read_connected_emu_fwstr": ReadConnectedEmuFwstrFn,
    disconnect_from_emu => "NRFJPROG_disconnect_from_emu": VoidCallFn,
    recover => "NRFJPROG_recover": VoidCallFn,
    is_connected_to_device => "NRFJPROG_is_connected_to_device": IsConnectedToDeviceFn,
    connect_to_device => "NRFJPROG_connect_to_device": VoidCallFn,
    disconnect_from_device => "NRFJPROG_disconnect_from_device": VoidCallFn,
    readback_protect => "NRFJPROG_readback_protect": ReadbackProtectFn,
    readback_status => "NRFJPROG_readback_status": ReadbackStatusFn,
    read_region_0_size_and_source => "NRFJPROG_read_region_0_size_and_source": ReadRegion0SizeAndSourceFn,
    debug_reset => "NRFJPROG_debug_reset": VoidCallFn,
    sys_reset => "NRFJPROG_sys_reset": VoidCallFn,
    pin_reset => "NRFJPROG_pin_reset": VoidCallFn,
    disable_bprot => "NRFJPROG_disable_bprot": VoidCallFn,
    erase_all => "NRFJPROG_erase_all": VoidCallFn,
    erase_page => "NRFJPROG_erase_page": EraseAddrFn,
    erase_uicr => "NRFJPROG_erase_uicr": VoidCallFn,
    write_u32 => "NRFJPROG_write_u32": WriteU32Fn,
    read_u32 => "NRFJPROG_read_u32": ReadU32Fn,
    write => "NRFJPROG_write": WriteFn,
    read => "NRFJPROG_read": ReadFn,
    is_halted => "NRFJPROG_is_halted": IsHaltedFn,
    halt => "NRFJPROG_halt": VoidCallFn,
    run => "NRFJPROG_run": RunFn,
    go => "NRFJPROG_go": VoidCallFn,
    step => "NRFJPROG_step": VoidCallFn,
    read_ram_sections_count => "NRFJPROG_read_ram_sections_count": ReadRamSectionsCountFn,
    read_ram_sections_size => "NRFJPROG_read_ram_sections_size": ReadRamSectionsSizeFn,
    read_ram_sections_power_status => "NRFJPROG_read_ram_sections_power_status": ReadRamSectionsPowerStatusFn,
    is_ram_powered => "NRFJPROG_is_ram_powered": IsRamPoweredFn,
    power_ram_all => "NRFJPROG_power_ram_all": VoidCallFn,
    unpower_ram_section => "NRFJPROG_unpower_ram_section": UnpowerRamSectionFn,
    read_cpu_register => "NRFJPROG_read_cpu_register": ReadCpuRegisterFn,
    write_cpu_register => "NRFJPROG_write_cpu_register": WriteCpuRegisterFn,
    read_device_version => "NRFJPROG_read_device_version": ReadDeviceVersionFn,
    read_device_family => "NRFJPROG_read_device_family": ReadDeviceFamilyFn,
    read_debug_port_register => "NRFJPROG_read_debug_port_register": ReadDebugPortRegisterFn,
    write_debug_port_register => "NRFJPROG_write_debug_port_register": WriteDebugPortRegisterFn,
    read_access_port_register => "NRFJPROG_read_access_port_register": ReadAccessPortRegisterFn,
    write_access_port_register => "NRFJPROG_write_access_port_register": WriteAccessPortRegisterFn,
    is_rtt_started => "NRFJPROG_is_rtt_started": IsRttStartedFn,
    rtt_set_control_block_address => "NRFJPROG_rtt_set_control_block_address": RttSetControlBlockAddressFn,
    rtt_start => "NRFJPROG_rtt_start": VoidCallFn,
    rtt_is_control_block_found => "NRFJPROG_rtt_is_control_block_found": RttIsControlBlockFoundFn,
    rtt_stop => "NRFJPROG_rtt_stop": VoidCallFn,
    rtt_read => "NRFJPROG_rtt_read": RttReadFn,
    rtt_write => "NRFJPROG_rtt_write": RttWriteFn,
    rtt_read_channel_count => "NRFJPROG_rtt_read_channel_count": RttReadChannelCountFn,
    rtt_read_channel_info => "NRFJPROG_rtt_read_channel_info": RttReadChannelInfoFn,
    is_qspi_init => "NRFJPROG_is_qspi_init": IsQspiInitFn,
    qspi_init => "NRFJPROG_qspi_init": QspiInitFn,
    qspi_uninit => "NRFJPROG_qspi_uninit": VoidCallFn,
    qspi_read => "NRFJPROG_qspi_read": QspiReadFn,
    qspi_write => "NRFJPROG_qspi_write": QspiWriteFn,
    qspi_erase => "NRFJPROG_qspi_erase": QspiEraseFn,
    qspi_custom => "NRFJPROG_qspi_custom": QspiCustomFn,
}
