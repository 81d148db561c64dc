mod endian;
